//! HTTP request handlers (route handlers).
//!
//! Each handler extracts the request, calls into a service with the stores
//! from [`crate::state::AppState`], and shapes the JSON response.

/// Service health endpoint
pub mod health;
/// Transaction endpoints
pub mod transactions;
/// Registration, login and user roster endpoints
pub mod users;
