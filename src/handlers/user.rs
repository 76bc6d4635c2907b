use std::sync::Arc;

use axum::{
    middleware::from_fn, response::IntoResponse, routing::get, Extension, Json, Router,
};

use crate::{
    middleware::{auth, AuthenticatedUser},
    models::users::{FilterUserDto, ProfileResponseDto},
    AppState, Result,
};

pub fn users_handler() -> Router {
    Router::new().route("/profile", get(get_profile).layer(from_fn(auth)))
}

async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse> {
    let (user, posts) = app_state.users_service.profile(auth_user.user.id).await?;

    Ok(Json(ProfileResponseDto {
        user: FilterUserDto::filter_user(&user),
        posts,
    }))
}
