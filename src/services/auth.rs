use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{models::users::User, repositories::user_repo::UserRepository, Error, Result};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expiration: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        jwt_expiration: i64,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration,
        }
    }

    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User> {
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(Error::BadRequest("Email already exists".to_string()));
        }

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(Error::BadRequest("Username already exists".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| Error::InternalServerError)?
            .to_string();

        self.user_repo
            .create_user(&username, &email, &password_hash)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(Error::Unauthorized)?;

        let argon2 = Argon2::default();
        let parsed_hash =
            PasswordHash::new(&user.password).map_err(|_| Error::InternalServerError)?;
        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| Error::Unauthorized)?;

        self.generate_token(user.id)
    }

    fn generate_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.jwt_expiration)).timestamp() as usize;
        let iat = now.timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| Error::InternalServerError)
    }

    pub fn decode_token<T: Into<String>>(&self, token: T) -> Result<Uuid> {
        let decoded = decode::<Claims>(
            &token.into(),
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| Error::Unauthorized)?;

        Uuid::parse_str(&decoded.claims.sub).map_err(|_| Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct InMemoryUserRepo {
        users: Mutex<Vec<User>>,
    }

    fn new_user(username: &str, email: &str, password_hash: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepo {
        async fn create_user(
            &self,
            username: &str,
            email: &str,
            password_hash: &str,
        ) -> Result<User> {
            let user = new_user(username, email, password_hash);
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn update_profile(
            &self,
            user_id: Uuid,
            username: Option<&str>,
            email: Option<&str>,
        ) -> Result<User> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(Error::NotFound)?;
            if let Some(username) = username {
                user.username = username.to_string();
            }
            if let Some(email) = email {
                user.email = email.to_string();
            }
            Ok(user.clone())
        }
    }

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserRepo::default()),
            "test-secret".to_string(),
            60,
        )
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let svc = service();
        svc.register("alice".into(), "alice@example.com".into(), "secret1".into())
            .await
            .unwrap();

        let err = svc
            .register("alice2".into(), "alice@example.com".into(), "secret2".into())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BadRequest(msg) if msg == "Email already exists"));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let svc = service();
        svc.register("alice".into(), "alice@example.com".into(), "secret1".into())
            .await
            .unwrap();

        let err = svc
            .register("alice".into(), "other@example.com".into(), "secret2".into())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BadRequest(msg) if msg == "Username already exists"));
    }

    #[tokio::test]
    async fn login_issues_a_token_for_the_registered_user() {
        let svc = service();
        let user = svc
            .register("bob".into(), "bob@example.com".into(), "hunter22".into())
            .await
            .unwrap();

        let token = svc.login("bob@example.com", "hunter22").await.unwrap();
        let subject = svc.decode_token(token).unwrap();

        assert_eq!(subject, user.id);
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let svc = service();
        svc.register("bob".into(), "bob@example.com".into(), "hunter22".into())
            .await
            .unwrap();

        let err = svc.login("bob@example.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[tokio::test]
    async fn login_rejects_an_unknown_email() {
        let svc = service();
        let err = svc.login("ghost@example.com", "whatever").await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[test]
    fn decode_rejects_garbage_tokens() {
        let svc = service();
        assert!(matches!(
            svc.decode_token("not-a-jwt").unwrap_err(),
            Error::Unauthorized
        ));
    }
}
