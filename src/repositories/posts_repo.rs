use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    models::posts::{AuthorSummary, Category, Post, PostWithAuthor},
    Result,
};

use super::PostgresRepo;

#[async_trait]
pub trait PostsRepository: Send + Sync {
    async fn get_posts(&self) -> Result<Vec<PostWithAuthor>>;
    async fn get_posts_by_category(&self, category: Category) -> Result<Vec<PostWithAuthor>>;
    async fn get_posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>>;
    async fn get_post(&self, post_id: Uuid) -> Result<Option<PostWithAuthor>>;
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;
    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
        category: Category,
        image: Option<&str>,
    ) -> Result<PostWithAuthor>;
    async fn update_post(
        &self,
        post_id: Uuid,
        title: &str,
        content: &str,
        category: Category,
        image: Option<&str>,
    ) -> Result<PostWithAuthor>;
    async fn delete_post(&self, post_id: Uuid) -> Result<()>;
}

const SELECT_POST_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.content, p.image, p.category, p.author_id, p.created_at,
           u.username AS author_username, u.email AS author_email
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    id: Uuid,
    title: String,
    content: String,
    image: Option<String>,
    category: Category,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    author_username: String,
    author_email: String,
}

impl From<PostWithAuthorRow> for PostWithAuthor {
    fn from(row: PostWithAuthorRow) -> Self {
        PostWithAuthor {
            id: row.id,
            title: row.title,
            content: row.content,
            image: row.image,
            category: row.category,
            author: AuthorSummary {
                id: row.author_id,
                username: row.author_username,
                email: row.author_email,
            },
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    async fn get_posts(&self) -> Result<Vec<PostWithAuthor>> {
        let sql = format!("{SELECT_POST_WITH_AUTHOR} ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn get_posts_by_category(&self, category: Category) -> Result<Vec<PostWithAuthor>> {
        let sql =
            format!("{SELECT_POST_WITH_AUTHOR} WHERE p.category = $1 ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn get_posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>> {
        let sql =
            format!("{SELECT_POST_WITH_AUTHOR} WHERE p.author_id = $1 ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn get_post(&self, post_id: Uuid) -> Result<Option<PostWithAuthor>> {
        let sql = format!("{SELECT_POST_WITH_AUTHOR} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostWithAuthor::from))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, image, category, author_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
        category: Category,
        image: Option<&str>,
    ) -> Result<PostWithAuthor> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, image, category, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(image)
        .bind(category)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        let sql = format!("{SELECT_POST_WITH_AUTHOR} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn update_post(
        &self,
        post_id: Uuid,
        title: &str,
        content: &str,
        category: Category,
        image: Option<&str>,
    ) -> Result<PostWithAuthor> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, category = $4, image = $5
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(image)
        .execute(&self.pool)
        .await?;

        let sql = format!("{SELECT_POST_WITH_AUTHOR} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
