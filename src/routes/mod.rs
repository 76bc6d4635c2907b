use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        auth::auth_handler, comments::comments_handler, likes::likes_handler,
        posts::posts_handler, user::users_handler,
    },
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/posts", posts_handler())
        .nest("/comments", comments_handler())
        .nest("/likes", likes_handler())
        .nest("/users", users_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()));

    Router::new()
        .route("/", get(|| async { "Blog Platform API is running" }))
        .nest("/api", api_route)
        .nest_service(
            "/uploads",
            ServeDir::new(app_state.config.uploads_dir.clone()),
        )
}
