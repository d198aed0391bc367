//! HTTP router construction.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    endpoints,
    handlers::{health, transactions, users},
    state::AppState,
};

/// Build the application router with every route and the tracing layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(health::health_check))
        // User routes
        .route(endpoints::REGISTER, post(users::register))
        .route(endpoints::LOG_IN, post(users::log_in))
        .route(endpoints::SET_AVATAR, post(users::set_avatar))
        .route(endpoints::ALL_USERS, get(users::all_users))
        // Transaction routes
        .route(
            endpoints::ADD_TRANSACTION,
            post(transactions::add_transaction),
        )
        .route(
            endpoints::GET_TRANSACTIONS,
            post(transactions::get_transactions),
        )
        .route(
            endpoints::UPDATE_TRANSACTION,
            put(transactions::update_transaction),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(transactions::delete_transaction),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
