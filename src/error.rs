//! Error types and HTTP error response handling.
//!
//! Services return [`AppError`]. Two API surfaces turn it into a response:
//! the user endpoints use [`AppError`]'s own `IntoResponse`, while the
//! transaction endpoints wrap it in [`TransactionApiError`], which keeps the
//! status codes existing clients of those endpoints depend on.
//!
//! Both surfaces produce the same body:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Human-readable error message"
//! }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation**: missing or malformed input
/// - **Not found**: user or transaction lookup missed
/// - **Conflict**: the email is already registered
/// - **Auth**: unknown email or wrong password
/// - **Rejected request**: the body or path could not be extracted
/// - **Infrastructure**: database, hashing or background task failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are missing or invalid.
    #[error("{0}")]
    Validation(String),

    /// No user matches the given identifier.
    #[error("User not found")]
    UserNotFound,

    /// No transaction matches the given identifier.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// A user with the same email already exists.
    #[error("{0}")]
    Conflict(String),

    /// Credentials did not match a stored user.
    #[error("{0}")]
    Auth(String),

    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The JSON body was malformed or had the wrong shape.
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    /// A path parameter could not be parsed.
    #[error("{0}")]
    InvalidPath(#[from] PathRejection),

    /// Password hashing or verification failed.
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Build the shared `{success: false, message}` error body.
fn failure(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "message": message
        })),
    )
        .into_response()
}

/// Status code mapping for the user endpoints.
///
/// - `Validation` → 400 Bad Request
/// - `Auth` → 401 Unauthorized
/// - `UserNotFound` / `TransactionNotFound` → 404 Not Found
/// - `Conflict` → 409 Conflict
/// - `InvalidBody` / `InvalidPath` → the extractor's own status (400, 415 or 422)
/// - anything else → 500 Internal Server Error, with the underlying message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::TransactionNotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidBody(ref rejection) => rejection.status(),
            AppError::InvalidPath(ref rejection) => rejection.status(),
            AppError::Database(ref e) => {
                tracing::error!(error = %e, "database error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Hashing(ref e) => {
                tracing::error!(error = %e, "password hashing error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Task(ref e) => {
                tracing::error!(error = %e, "blocking task failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        failure(status, self.to_string())
    }
}

/// Error wrapper for the transaction endpoints.
///
/// These endpoints answer with the legacy status codes:
///
/// - `Validation` → 408
/// - `UserNotFound` / `TransactionNotFound` → 400
/// - anything else → 401, including bodies that fail to deserialize
#[derive(Debug)]
pub struct TransactionApiError(pub AppError);

impl From<AppError> for TransactionApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for TransactionApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::InvalidBody(rejection))
    }
}

impl IntoResponse for TransactionApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::UserNotFound | AppError::TransactionNotFound => StatusCode::BAD_REQUEST,
            ref other => {
                tracing::warn!(error = %other, "transaction request failed");
                StatusCode::UNAUTHORIZED
            }
        };

        failure(status, self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{AppError, TransactionApiError};

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn user_surface_maps_taxonomy_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Auth("nope".into()), StatusCode::UNAUTHORIZED),
            (AppError::UserNotFound, StatusCode::NOT_FOUND),
            (AppError::Conflict("dupe".into()), StatusCode::CONFLICT),
            (
                AppError::Database(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(error.into_response().status(), want);
        }
    }

    #[tokio::test]
    async fn transaction_surface_keeps_legacy_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::REQUEST_TIMEOUT),
            (AppError::UserNotFound, StatusCode::BAD_REQUEST),
            (AppError::TransactionNotFound, StatusCode::BAD_REQUEST),
            (
                AppError::Database(sqlx::Error::PoolClosed),
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(TransactionApiError(error).into_response().status(), want);
        }
    }

    #[tokio::test]
    async fn error_body_carries_success_flag_and_message() {
        let response = TransactionApiError(AppError::UserNotFound).into_response();

        let body = body_json(response).await;

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User not found");
    }
}
