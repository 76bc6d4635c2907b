use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;

use super::PostgresRepo;

#[async_trait]
pub trait LikesRepository: Send + Sync {
    async fn insert_like(&self, post_id: Uuid, user_id: Uuid) -> Result<()>;
    /// Returns whether a row was actually removed.
    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
    async fn count_likes(&self, post_id: Uuid) -> Result<i64>;
    async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl LikesRepository for PostgresRepo {
    async fn insert_like(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let liked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(liked)
    }
}
