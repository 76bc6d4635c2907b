use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    middleware::{auth, AuthenticatedUser},
    models::{
        posts::{CategoryQueryDto, PostForm, PostResponseDto},
        response::MessageResponse,
    },
    uploads, AppState, Error, Result,
};

// multipart bodies carry up to a 5MB image plus the text fields
const POST_BODY_LIMIT: usize = uploads::MAX_IMAGE_BYTES + 1024 * 1024;

pub fn posts_handler() -> Router {
    let public = Router::new()
        .route("/", get(get_posts))
        .route("/filter", get(get_posts_by_category))
        .route("/{id}", get(get_post));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{id}", put(update_post))
        .route("/{id}", delete(delete_post))
        .layer(from_fn(auth))
        .layer(DefaultBodyLimit::max(POST_BODY_LIMIT));

    public.merge(protected)
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_posts_by_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<CategoryQueryDto>,
) -> Result<impl IntoResponse> {
    let posts = app_state
        .posts_service
        .get_posts_by_category(query.category.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_post_form(multipart).await?;

    let post = app_state
        .posts_service
        .create_post(auth_user.user.id, form)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostResponseDto {
            message: "Post created successfully".to_string(),
            post,
        }),
    ))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_post_form(multipart).await?;

    let post = app_state
        .posts_service
        .update_post(post_id, auth_user.user.id, form)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PostResponseDto {
            message: "Post updated successfully".to_string(),
            post,
        }),
    ))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    app_state
        .posts_service
        .delete_post(post_id, auth_user.user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Post deleted successfully".to_string(),
        }),
    ))
}

async fn read_post_form(mut multipart: Multipart) -> Result<PostForm> {
    let mut form = PostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Error::BadRequest("Invalid form data".to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(read_text(field).await?),
            "content" => form.content = Some(read_text(field).await?),
            "category" => form.category = Some(read_text(field).await?),
            "image" => form.image = Some(uploads::read_image_field(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|_| Error::BadRequest("Invalid form data".to_string()))
}
