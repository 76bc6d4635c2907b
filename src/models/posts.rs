use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "post_category")]
pub enum Category {
    Technology,
    Health,
    Lifestyle,
    Education,
}

impl Category {
    /// Parses a category submitted by a client. Returns `None` for anything
    /// outside the four fixed values, including empty strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Technology" => Some(Self::Technology),
            "Health" => Some(Self::Health),
            "Lifestyle" => Some(Self::Lifestyle),
            "Education" => Some(Self::Education),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Lifestyle => "Lifestyle",
            Self::Education => "Education",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Category,
    #[serde(rename = "authorId")]
    pub author_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: Category,
    pub author: AuthorSummary,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Fields collected from the multipart form on post create/update. The image,
/// when present, has already passed type and size checks but is not yet on disk.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<crate::uploads::ImageUpload>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQueryDto {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponseDto {
    pub message: String,
    pub post: PostWithAuthor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_fixed_categories() {
        assert_eq!(Category::parse("Technology"), Some(Category::Technology));
        assert_eq!(Category::parse("Health"), Some(Category::Health));
        assert_eq!(Category::parse("Lifestyle"), Some(Category::Lifestyle));
        assert_eq!(Category::parse("Education"), Some(Category::Education));
    }

    #[test]
    fn rejects_unknown_categories() {
        assert_eq!(Category::parse("Music"), None);
        assert_eq!(Category::parse("technology"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn serializes_to_the_wire_name() {
        let json = serde_json::to_string(&Category::Health).unwrap();
        assert_eq!(json, "\"Health\"");
        assert_eq!(Category::Health.as_str(), "Health");
    }
}
