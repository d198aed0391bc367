//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers. They receive
//! the stores they need as arguments and return [`crate::error::AppError`] on
//! failure.

pub mod password;
pub mod transaction_service;
pub mod user_service;
