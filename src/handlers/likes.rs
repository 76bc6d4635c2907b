use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    middleware::{auth, AuthenticatedUser},
    models::likes::{LikeCountDto, LikeStatusDto},
    AppState, Result,
};

pub fn likes_handler() -> Router {
    Router::new()
        .route("/{post_id}", get(get_like_count))
        .route("/{post_id}", post(toggle_like).layer(from_fn(auth)))
        .route("/check/{post_id}", get(check_like_status).layer(from_fn(auth)))
}

async fn get_like_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let count = app_state.likes_service.count(post_id).await?;
    Ok((StatusCode::OK, Json(LikeCountDto { count })))
}

async fn toggle_like(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let status = app_state
        .likes_service
        .toggle(post_id, auth_user.user.id)
        .await?;

    Ok((StatusCode::OK, Json(status)))
}

async fn check_like_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let liked = app_state
        .likes_service
        .check_status(post_id, auth_user.user.id)
        .await?;

    Ok((StatusCode::OK, Json(LikeStatusDto { liked })))
}
