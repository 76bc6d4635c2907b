use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::likes::LikeToggleDto,
    repositories::{likes_repo::LikesRepository, posts_repo::PostsRepository},
    Error, Result,
};

#[derive(Clone)]
pub struct LikesService {
    likes: Arc<dyn LikesRepository>,
    posts: Arc<dyn PostsRepository>,
}

impl LikesService {
    pub fn new(likes: Arc<dyn LikesRepository>, posts: Arc<dyn PostsRepository>) -> Self {
        Self { likes, posts }
    }

    /// Flips the (user, post) relation and reports the resulting state. Two
    /// racing toggles are last-write-wins; there is no guard.
    pub async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeToggleDto> {
        self.posts
            .find_post(post_id)
            .await?
            .ok_or(Error::NotFound)?;

        let liked = if self.likes.delete_like(post_id, user_id).await? {
            false
        } else {
            self.likes.insert_like(post_id, user_id).await?;
            true
        };

        let count = self.likes.count_likes(post_id).await?;

        Ok(LikeToggleDto { liked, count })
    }

    pub async fn count(&self, post_id: Uuid) -> Result<i64> {
        self.likes.count_likes(post_id).await
    }

    pub async fn check_status(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.likes.has_liked(post_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::Mutex,
    };

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::models::posts::{Category, Post, PostWithAuthor};

    use super::*;

    #[derive(Default)]
    struct InMemoryLikesRepo {
        likes: Mutex<HashSet<(Uuid, Uuid)>>,
    }

    #[async_trait]
    impl LikesRepository for InMemoryLikesRepo {
        async fn insert_like(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
            self.likes.lock().unwrap().insert((user_id, post_id));
            Ok(())
        }

        async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
            Ok(self.likes.lock().unwrap().remove(&(user_id, post_id)))
        }

        async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, p)| *p == post_id)
                .count() as i64)
        }

        async fn has_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
            Ok(self.likes.lock().unwrap().contains(&(user_id, post_id)))
        }
    }

    struct SinglePostRepo {
        post: Post,
    }

    #[async_trait]
    impl PostsRepository for SinglePostRepo {
        async fn get_posts(&self) -> Result<Vec<PostWithAuthor>> {
            Ok(vec![])
        }

        async fn get_posts_by_category(&self, _category: Category) -> Result<Vec<PostWithAuthor>> {
            Ok(vec![])
        }

        async fn get_posts_by_author(&self, _author_id: Uuid) -> Result<Vec<PostWithAuthor>> {
            Ok(vec![])
        }

        async fn get_post(&self, _post_id: Uuid) -> Result<Option<PostWithAuthor>> {
            Ok(None)
        }

        async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
            Ok((self.post.id == post_id).then(|| self.post.clone()))
        }

        async fn create_post(
            &self,
            _author_id: Uuid,
            _title: &str,
            _content: &str,
            _category: Category,
            _image: Option<&str>,
        ) -> Result<PostWithAuthor> {
            Err(Error::InternalServerError)
        }

        async fn update_post(
            &self,
            _post_id: Uuid,
            _title: &str,
            _content: &str,
            _category: Category,
            _image: Option<&str>,
        ) -> Result<PostWithAuthor> {
            Err(Error::InternalServerError)
        }

        async fn delete_post(&self, _post_id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    fn service_with_post() -> (LikesService, Uuid) {
        let post = Post {
            id: Uuid::now_v7(),
            title: "t".to_string(),
            content: "c".to_string(),
            image: None,
            category: Category::Technology,
            author_id: Uuid::now_v7(),
            created_at: Utc::now(),
        };
        let post_id = post.id;
        let svc = LikesService::new(
            Arc::new(InMemoryLikesRepo::default()),
            Arc::new(SinglePostRepo { post }),
        );
        (svc, post_id)
    }

    #[tokio::test]
    async fn double_toggle_returns_to_the_original_state() {
        let (svc, post_id) = service_with_post();
        let user = Uuid::now_v7();

        let first = svc.toggle(post_id, user).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.count, 1);

        let second = svc.toggle(post_id, user).await.unwrap();
        assert!(!second.liked);
        assert_eq!(second.count, 0);
    }

    #[tokio::test]
    async fn count_after_n_toggles_matches_the_parity() {
        let (svc, post_id) = service_with_post();
        let user = Uuid::now_v7();

        for _ in 0..5 {
            svc.toggle(post_id, user).await.unwrap();
        }
        assert_eq!(svc.count(post_id).await.unwrap(), 1);
        assert!(svc.check_status(post_id, user).await.unwrap());

        svc.toggle(post_id, user).await.unwrap();
        assert_eq!(svc.count(post_id).await.unwrap(), 0);
        assert!(!svc.check_status(post_id, user).await.unwrap());
    }

    #[tokio::test]
    async fn toggle_on_a_missing_post_is_not_found() {
        let (svc, _) = service_with_post();
        let err = svc.toggle(Uuid::now_v7(), Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn likes_are_tracked_per_user() {
        let (svc, post_id) = service_with_post();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();

        svc.toggle(post_id, alice).await.unwrap();
        let second = svc.toggle(post_id, bob).await.unwrap();

        assert_eq!(second.count, 2);
        assert!(svc.check_status(post_id, alice).await.unwrap());
        assert!(svc.check_status(post_id, bob).await.unwrap());
    }
}
