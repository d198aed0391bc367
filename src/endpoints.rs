//! Route paths for the HTTP API.

pub const REGISTER: &str = "/api/auth/register";
pub const LOG_IN: &str = "/api/auth/login";
pub const SET_AVATAR: &str = "/api/auth/setAvatar/{id}";
pub const ALL_USERS: &str = "/api/auth/getAllUsers/{id}";

pub const ADD_TRANSACTION: &str = "/api/v1/addTransaction";
pub const GET_TRANSACTIONS: &str = "/api/v1/getTransaction";
pub const UPDATE_TRANSACTION: &str = "/api/v1/updateTransaction/{id}";
pub const DELETE_TRANSACTION: &str = "/api/v1/deleteTransaction/{id}";

pub const HEALTH: &str = "/health";

/// Fill the `{id}` placeholder of a path template.
#[cfg(test)]
pub fn format_endpoint(template: &str, id: impl std::fmt::Display) -> String {
    template.replace("{id}", &id.to_string())
}
