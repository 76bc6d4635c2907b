use std::{env, sync::Arc};

use config::Config;
use handlers::auth::configure_cors;
use repositories::PostgresRepo;
use routes::create_router;
use services::{
    auth::AuthService, comments::CommentsService, likes::LikesService, posts::PostsService,
    user::UserService,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod uploads;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub posts_service: PostsService,
    pub comments_service: CommentsService,
    pub likes_service: LikesService,
    pub users_service: UserService,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("Connection to the database is successful");
            pool
        }
        Err(err) => {
            tracing::error!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run migrations: {:?}", err);
        std::process::exit(1);
    }

    let repo = Arc::new(PostgresRepo::new(pool));

    let app_state = AppState {
        config: config.clone(),
        auth_service: AuthService::new(
            repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_maxage,
        ),
        posts_service: PostsService::new(repo.clone(), config.uploads_dir.clone()),
        comments_service: CommentsService::new(repo.clone(), repo.clone()),
        likes_service: LikesService::new(repo.clone(), repo.clone()),
        users_service: UserService::new(repo.clone(), repo),
    };

    let app = create_router(Arc::new(app_state)).layer(configure_cors(&config));

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let listener = tokio::net::TcpListener::bind(format!("[::]:{port}"))
        .await
        .expect("failed to bind the server port");

    info!("Server running on port {port}");
    axum::serve(listener, app).await.expect("server error");
}
