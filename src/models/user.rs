//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing an account holder
//! - `RegisterRequest`, `LoginRequest`, `AvatarRequest`: request bodies
//! - `UserResponse`: user payload with the password hash removed
//! - `UserSummary`: the projected roster entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. The `transaction_ids` column is the user's
/// reference list: ids of owned transactions in the order they were added.
/// It is maintained by hand when transactions are created or deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Unique across all users
    pub email: String,

    /// bcrypt hash; the plain-text password is never stored
    pub password_hash: String,

    pub is_avatar_image_set: bool,

    /// Opaque image blob, empty until an avatar is set
    pub avatar_image: String,

    pub transaction_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Request body for registration.
///
/// # JSON Example
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
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation failure rather than a body rejection.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for setting an avatar.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AvatarRequest {
    #[serde(default)]
    pub image: String,
}

/// Response body for avatar assignment.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub is_set: bool,
    pub image: String,
}

/// User payload returned to clients.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@example.com",
///   "isAvatarImageSet": false,
///   "avatarImage": "",
///   "transactions": [],
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_avatar_image_set: bool,
    pub avatar_image: String,
    pub transactions: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Convert database User to API UserResponse.
///
/// This drops the password hash; the stored record is untouched.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_avatar_image_set: user.is_avatar_image_set,
            avatar_image: user.avatar_image,
            transactions: user.transaction_ids,
            created_at: user.created_at,
        }
    }
}

/// Success body for registration and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: User) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: user.into(),
        }
    }
}

/// Projected roster entry returned by the "all other users" listing.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_image: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar_image: user.avatar_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{User, UserResponse};

    #[test]
    fn response_never_serializes_password() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".into(),
            is_avatar_image_set: false,
            avatar_image: String::new(),
            transaction_ids: vec![Uuid::new_v4()],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["transactions"].as_array().unwrap().len(), 1);
    }
}
