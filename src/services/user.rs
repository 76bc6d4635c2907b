use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::{
        posts::PostWithAuthor,
        users::{UpdateProfileDto, User},
    },
    repositories::{posts_repo::PostsRepository, user_repo::UserRepository},
    Error, Result,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostsRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostsRepository>) -> Self {
        Self { users, posts }
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        self.users.find_by_id(user_id).await?.ok_or(Error::NotFound)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<(User, Vec<PostWithAuthor>)> {
        let user = self.get_user(user_id).await?;
        let posts = self.posts.get_posts_by_author(user_id).await?;

        Ok((user, posts))
    }

    pub async fn update_profile(&self, user_id: Uuid, update: UpdateProfileDto) -> Result<User> {
        if let Some(username) = &update.username {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != user_id {
                    return Err(Error::BadRequest("Username already exists".to_string()));
                }
            }
        }

        if let Some(email) = &update.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(Error::BadRequest("Email already exists".to_string()));
                }
            }
        }

        self.users
            .update_profile(user_id, update.username.as_deref(), update.email.as_deref())
            .await
    }
}
