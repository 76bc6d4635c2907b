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
use validator::Validate;

use crate::{
    middleware::{auth, AuthenticatedUser},
    models::comments::CreateCommentDto,
    AppState, Result,
};

pub fn comments_handler() -> Router {
    Router::new()
        .route("/{post_id}", get(get_comments))
        .route("/{post_id}", post(create_comment).layer(from_fn(auth)))
}

async fn get_comments(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let comments = app_state.comments_service.get_comments(post_id).await?;
    Ok((StatusCode::OK, Json(comments)))
}

async fn create_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
    Json(comment): Json<CreateCommentDto>,
) -> Result<impl IntoResponse> {
    comment.validate()?;

    let comment = app_state
        .comments_service
        .create_comment(post_id, auth_user.user.id, &comment.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
