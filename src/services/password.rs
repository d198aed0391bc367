//! Salted password hashing with bcrypt.

use crate::error::AppError;

/// Hash `plain` with a fresh salt at the given bcrypt `cost`.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check `plain` against a stored bcrypt hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(plain, hash)?)
}
