use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::from_fn,
    response::IntoResponse,
    routing::{post, put},
    Extension, Json, Router,
};
use tower_cookies::Cookie;
use tower_http::cors::CorsLayer;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    middleware::{auth, AuthenticatedUser},
    models::{
        response::MessageResponse,
        users::{
            FilterUserDto, LoginUserDto, RegisterUserDto, UpdateProfileDto,
            UpdateProfileResponseDto, UserLoginResponseDto,
        },
    },
    AppState, Error, Result,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile/{id}", put(update_profile).layer(from_fn(auth)))
}

pub fn configure_cors(config: &Config) -> CorsLayer {
    let origin = HeaderValue::from_str(&config.frontend_origin)
        .expect("FRONTEND_ORIGIN must be a valid header value");

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(new_user): Json<RegisterUserDto>,
) -> Result<impl IntoResponse> {
    new_user.validate()?;

    app_state
        .auth_service
        .register(new_user.username, new_user.email, new_user.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(user): Json<LoginUserDto>,
) -> Result<impl IntoResponse> {
    user.validate()?;

    let token = app_state
        .auth_service
        .login(&user.email, &user.password)
        .await?;

    let cookie_duration = time::Duration::minutes(app_state.config.jwt_maxage);
    let cookie = Cookie::build(("token", &token))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| Error::InternalServerError)?,
    );

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token: token.clone(),
    });

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse> {
    if auth_user.user.id != user_id {
        return Err(Error::Forbidden);
    }

    update.validate()?;

    let user = app_state
        .users_service
        .update_profile(user_id, update)
        .await?;

    Ok(Json(UpdateProfileResponseDto {
        message: "Profile updated successfully".to_string(),
        user: FilterUserDto::filter_user(&user),
    }))
}
