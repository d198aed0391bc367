//! User service - registration, login, avatars and the user roster.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        present,
        user::{AvatarResponse, LoginRequest, NewUser, RegisterRequest, User, UserSummary},
    },
    services::password::{hash_password, verify_password},
    store::UserStore,
};

/// Shortest accepted plain-text password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

    regex.is_match(email)
}

/// Register a new user.
///
/// # Process
///
/// 1. Require every field
/// 2. Require `password == confirmPassword`
/// 3. Check email format and password length
/// 4. Reject an email that is already registered
/// 5. Hash the password at `cost` on the blocking pool and insert the user
///
/// # Errors
///
/// - `Validation`: missing field, mismatch, bad email or short password
/// - `Conflict`: email already registered
/// - `Hashing` / `Task` / `Database`: infrastructure failure
pub async fn register(
    users: &dyn UserStore,
    request: RegisterRequest,
    cost: u32,
) -> Result<User, AppError> {
    let (Some(first_name), Some(last_name), Some(email), Some(password), Some(confirm_password)) = (
        present(request.first_name),
        present(request.last_name),
        present(request.email),
        present(request.password),
        present(request.confirm_password),
    ) else {
        return Err(AppError::Validation("Please enter all fields".to_string()));
    };

    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    if !is_valid_email(&email) {
        return Err(AppError::Validation("Please enter a valid email".to_string()));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let user = users
        .create(NewUser {
            first_name,
            last_name,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(user)
}

/// Verify credentials and return the matching user.
///
/// # Errors
///
/// - `Validation`: email or password missing
/// - `Auth`: unknown email, or the password does not match
pub async fn login(users: &dyn UserStore, request: LoginRequest) -> Result<User, AppError> {
    let (Some(email), Some(password)) = (present(request.email), present(request.password)) else {
        return Err(AppError::Validation("Please enter all fields".to_string()));
    };

    let Some(user) = users.find_by_email(&email).await? else {
        tracing::warn!("login rejected: unknown email");
        return Err(AppError::Auth("User not found".to_string()));
    };

    let stored_hash = user.password_hash.clone();
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await??;

    if !matches {
        tracing::warn!(user_id = %user.id, "login rejected: bad password");
        return Err(AppError::Auth("Incorrect email or password".to_string()));
    }

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(user)
}

/// Set the avatar for `user_id`. The image is stored as given.
pub async fn set_avatar(
    users: &dyn UserStore,
    user_id: Uuid,
    image: String,
) -> Result<AvatarResponse, AppError> {
    let user = users
        .set_avatar(user_id, &image)
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!(user_id = %user.id, "avatar set");

    Ok(AvatarResponse {
        is_set: user.is_avatar_image_set,
        image: user.avatar_image,
    })
}

/// Every user except `exclude_id`.
pub async fn list_others(
    users: &dyn UserStore,
    exclude_id: Uuid,
) -> Result<Vec<UserSummary>, AppError> {
    users.list_except(exclude_id).await
}
