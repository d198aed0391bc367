//! Data models representing database entities and API payloads.

/// Transaction listing filters
pub mod filter;
/// Financial transaction model
pub mod transaction;
/// Account holder model
pub mod user;

/// Keep a string only if it is non-empty.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
