use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::comments::CommentWithAuthor,
    repositories::{comments_repo::CommentsRepository, posts_repo::PostsRepository},
    Error, Result,
};

#[derive(Clone)]
pub struct CommentsService {
    comments: Arc<dyn CommentsRepository>,
    posts: Arc<dyn PostsRepository>,
}

impl CommentsService {
    pub fn new(comments: Arc<dyn CommentsRepository>, posts: Arc<dyn PostsRepository>) -> Self {
        Self { comments, posts }
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<CommentWithAuthor> {
        self.posts
            .find_post(post_id)
            .await?
            .ok_or(Error::NotFound)?;

        self.comments
            .create_comment(post_id, author_id, content)
            .await
    }

    pub async fn get_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        self.comments.get_comments(post_id).await
    }
}
