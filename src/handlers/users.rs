//! User management HTTP handlers.
//!
//! This module implements the user-related API endpoints:
//! - POST /api/auth/register - Create a new user
//! - POST /api/auth/login - Verify credentials
//! - POST /api/auth/setAvatar/{id} - Store an avatar image
//! - GET /api/auth/getAllUsers/{id} - List every other user
//!
//! Errors use the user-surface status mapping of [`AppError`]. Extractor
//! rejections go through it too, so every failure body carries `success`.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::user::{
        AuthResponse, AvatarRequest, AvatarResponse, LoginRequest, RegisterRequest, UserSummary,
    },
    services::user_service,
    state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@example.com",
///   "password": "secret1",
///   "confirmPassword": "secret1"
/// }
/// ```
///
/// # Response
///
/// - **200**: `{success: true, message, user}` without the password
/// - **400**: missing field, password mismatch, bad email, short password
/// - **409**: email already registered
/// - **500**: any other failure
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = user_service::register(state.users.as_ref(), request, state.password_cost).await?;

    Ok(Json(AuthResponse::new("User created successfully", user)))
}

/// Log in with email and password.
///
/// # Response
///
/// - **200**: `{success: true, message: "Welcome back, <firstName>", user}`
/// - **400**: email or password missing
/// - **401**: unknown email or wrong password
pub async fn log_in(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = user_service::login(state.users.as_ref(), request).await?;
    let message = format!("Welcome back, {}", user.first_name);

    Ok(Json(AuthResponse::new(message, user)))
}

/// Set the avatar image for a user.
///
/// # Response (200)
///
/// ```json
/// {
///   "isSet": true,
///   "image": "<image data>"
/// }
/// ```
pub async fn set_avatar(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(request), _): WithRejection<Json<AvatarRequest>, AppError>,
) -> Result<Json<AvatarResponse>, AppError> {
    let avatar = user_service::set_avatar(state.users.as_ref(), user_id, request.image).await?;

    Ok(Json(avatar))
}

/// List every user except the one in the path.
///
/// Returns a bare array of `{id, email, firstName, lastName, avatarImage}`.
pub async fn all_users(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = user_service::list_others(state.users.as_ref(), user_id).await?;

    Ok(Json(users))
}
