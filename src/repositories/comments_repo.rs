use async_trait::async_trait;
use uuid::Uuid;

use crate::{models::comments::CommentWithAuthor, Result};

use super::PostgresRepo;

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<CommentWithAuthor>;
    async fn get_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>>;
}

#[async_trait]
impl CommentsRepository for PostgresRepo {
    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<CommentWithAuthor> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, content)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .execute(&self.pool)
        .await?;

        let comment = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.post_id, c.content, c.author_id, c.created_at,
                   u.username AS author_username
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn get_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.post_id, c.content, c.author_id, c.created_at,
                   u.username AS author_username
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
