//! Storage seams for users and transactions.
//!
//! Services talk to the two collections only through these traits, which are
//! handed to them explicitly (see [`crate::state::AppState`]). Production uses
//! the PostgreSQL implementations in [`postgres`]; tests use the in-memory
//! implementations in `memory`.
//!
//! Each method is a single-record (or single-query) operation. Nothing here
//! spans both collections, so a sequence such as "insert a transaction, then
//! append it to the owner's reference list" is two independent writes.
//! Writes touch only the fields they change: concurrent requests for the same
//! user or transaction never overwrite each other's fields.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        filter::TransactionFilter,
        transaction::{NewTransaction, Transaction, TransactionPatch},
        user::{NewUser, User, UserSummary},
    },
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Append `transaction_id` to the user's reference list.
    async fn push_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError>;

    /// Remove every occurrence of `transaction_id` from the user's reference list.
    async fn remove_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError>;

    /// Mark the avatar as set and store `image`. `None` if no such user.
    async fn set_avatar(&self, id: Uuid, image: &str) -> Result<Option<User>, AppError>;

    /// Every user except `id`, in insertion order.
    async fn list_except(&self, id: Uuid) -> Result<Vec<UserSummary>, AppError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, AppError>;

    /// Transactions matching `filter`, in insertion order.
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, AppError>;

    /// Overwrite the fields `patch` carries. `None` if no such transaction.
    async fn update(
        &self,
        id: Uuid,
        patch: &TransactionPatch,
    ) -> Result<Option<Transaction>, AppError>;

    /// Remove a transaction, returning it if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Transaction>, AppError>;
}
