use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    #[serde(rename = "postId")]
    pub post_id: Uuid,
    pub content: String,
    #[serde(rename = "authorId")]
    pub author_id: Uuid,
    #[serde(rename = "authorUsername")]
    pub author_username: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Validate, Debug, Deserialize, Serialize, Clone)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}
