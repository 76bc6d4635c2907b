use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::posts::{Category, PostForm, PostWithAuthor},
    repositories::posts_repo::PostsRepository,
    uploads, Error, Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
    uploads_dir: String,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>, uploads_dir: String) -> Self {
        Self { repo, uploads_dir }
    }

    pub async fn get_posts(&self) -> Result<Vec<PostWithAuthor>> {
        self.repo.get_posts().await
    }

    pub async fn get_posts_by_category(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PostWithAuthor>> {
        let category =
            category.ok_or_else(|| Error::BadRequest("Category is required".to_string()))?;
        let category = Category::parse(category)
            .ok_or_else(|| Error::BadRequest("Invalid category".to_string()))?;

        self.repo.get_posts_by_category(category).await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostWithAuthor> {
        self.repo.get_post(post_id).await?.ok_or(Error::NotFound)
    }

    pub async fn create_post(&self, author_id: Uuid, form: PostForm) -> Result<PostWithAuthor> {
        let (title, content) = require_title_and_content(&form)?;

        let category = form
            .category
            .as_deref()
            .and_then(Category::parse)
            .ok_or_else(|| Error::BadRequest("Invalid category".to_string()))?;

        // Category is validated before the file hits the disk; a failed insert
        // afterwards can still orphan the file (accepted, not rolled back).
        let image = match &form.image {
            Some(upload) => Some(uploads::save_image(&self.uploads_dir, upload).await?),
            None => None,
        };

        self.repo
            .create_post(author_id, title, content, category, image.as_deref())
            .await
    }

    pub async fn update_post(
        &self,
        post_id: Uuid,
        requester_id: Uuid,
        form: PostForm,
    ) -> Result<PostWithAuthor> {
        let post = self.repo.find_post(post_id).await?.ok_or(Error::NotFound)?;

        if post.author_id != requester_id {
            return Err(Error::Forbidden);
        }

        let (title, content) = require_title_and_content(&form)?;

        // Missing category keeps the stored one, same as the update contract.
        let category = match form.category.as_deref() {
            Some(value) => Category::parse(value)
                .ok_or_else(|| Error::BadRequest("Invalid category".to_string()))?,
            None => post.category,
        };

        let image = match &form.image {
            Some(upload) => {
                let filename = uploads::save_image(&self.uploads_dir, upload).await?;
                if let Some(old) = &post.image {
                    uploads::delete_image(&self.uploads_dir, old).await;
                }
                Some(filename)
            }
            None => post.image,
        };

        self.repo
            .update_post(post_id, title, content, category, image.as_deref())
            .await
    }

    pub async fn delete_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<()> {
        let post = self.repo.find_post(post_id).await?.ok_or(Error::NotFound)?;

        if post.author_id != requester_id {
            return Err(Error::Forbidden);
        }

        if let Some(image) = &post.image {
            uploads::delete_image(&self.uploads_dir, image).await;
        }

        self.repo.delete_post(post_id).await
    }

    pub async fn get_posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>> {
        self.repo.get_posts_by_author(author_id).await
    }
}

fn require_title_and_content(form: &PostForm) -> Result<(&str, &str)> {
    match (form.title.as_deref(), form.content.as_deref()) {
        (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
            Ok((title, content))
        }
        _ => Err(Error::BadRequest(
            "Title and content are required".to_string(),
        )),
    }
}
