//! Transaction service - Core business logic for financial records.
//!
//! This service handles:
//! - Required-field validation for new transactions
//! - Type and date-window filtering for listings
//! - Partial updates
//! - Keeping the owner's reference list in step on create and delete
//!
//! # Consistency
//!
//! Create and delete each perform two independent writes: one to the
//! transaction store and one appending to (or removing from) the owner's
//! reference list. There is no transaction spanning both stores. If the
//! second write fails, create leaves a transaction that its owner does not
//! list, and delete leaves a dangling id in the owner's list.
//!
//! The reference-list write is a single append or remove, so concurrent
//! creates and deletes for one user, or an avatar change racing them, never
//! drop each other's changes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        filter::TransactionFilter,
        present,
        transaction::{
            AmountField, CreateTransactionRequest, ListTransactionsRequest, NewTransaction,
            Transaction, TransactionPatch, UpdateTransactionRequest, parse_date,
        },
    },
    store::{TransactionStore, UserStore},
};

/// Parse a client supplied id. Anything that is not a UUID cannot resolve.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Create a transaction and append it to its owner's reference list.
///
/// # Process
///
/// 1. Require title, amount, description, date, category, type and payment
///    method (notes are optional)
/// 2. Resolve the owning user
/// 3. Insert the transaction
/// 4. Append its id to the user's reference list
///
/// # Errors
///
/// - `Validation`: a required field is missing, or the date or amount is
///   unparseable
/// - `UserNotFound`: `userId` does not resolve
/// - `Database`: either write failed (see module docs for the partial state)
pub async fn create_transaction(
    users: &dyn UserStore,
    transactions: &dyn TransactionStore,
    request: CreateTransactionRequest,
) -> Result<Transaction, AppError> {
    let (
        Some(title),
        Some(amount),
        Some(description),
        Some(date),
        Some(category),
        Some(transaction_type),
        Some(payment_method),
    ) = (
        present(request.title),
        request.amount.filter(AmountField::is_truthy),
        present(request.description),
        present(request.date),
        present(request.category),
        present(request.transaction_type),
        present(request.payment_method),
    )
    else {
        return Err(AppError::Validation("Please Fill all fields".to_string()));
    };

    let date = parse_date(&date)?;
    let amount = amount.to_f64()?;

    let user = match request.user_id.as_deref().and_then(parse_id) {
        Some(user_id) => users.find_by_id(user_id).await?,
        None => None,
    }
    .ok_or(AppError::UserNotFound)?;

    let transaction = transactions
        .insert(NewTransaction {
            title,
            amount,
            description,
            category,
            date,
            transaction_type,
            payment_method,
            notes: present(request.notes),
            user_id: user.id,
        })
        .await?;

    if let Err(e) = users.push_transaction_ref(user.id, transaction.id).await {
        tracing::error!(
            transaction_id = %transaction.id,
            user_id = %user.id,
            error = %e,
            "transaction stored but owner's reference list was not updated"
        );
        return Err(e);
    }

    tracing::info!(transaction_id = %transaction.id, user_id = %user.id, "transaction added");

    Ok(transaction)
}

/// List a user's transactions filtered by type and date window.
///
/// `now` anchors relative windows ("last N days").
///
/// # Errors
///
/// - `UserNotFound`: `userId` does not resolve
/// - `Validation`: bad frequency or custom date
pub async fn list_transactions(
    users: &dyn UserStore,
    transactions: &dyn TransactionStore,
    request: ListTransactionsRequest,
    now: DateTime<Utc>,
) -> Result<Vec<Transaction>, AppError> {
    let user = match request.user_id.as_deref().and_then(parse_id) {
        Some(user_id) => users.find_by_id(user_id).await?,
        None => None,
    }
    .ok_or(AppError::UserNotFound)?;

    let filter = TransactionFilter::build(
        user.id,
        request.transaction_type,
        request.frequency.as_ref(),
        request.start_date,
        request.end_date,
        now,
    )?;

    let found = transactions.list(&filter).await?;

    tracing::debug!(user_id = %user.id, count = found.len(), "transactions listed");

    Ok(found)
}

/// Apply a partial update to a transaction.
///
/// Only truthy fields overwrite stored values; the owner never changes.
/// Fields the request leaves out are not written.
///
/// # Errors
///
/// - `TransactionNotFound`: no transaction with this id
/// - `Validation`: unparseable date or amount
pub async fn update_transaction(
    transactions: &dyn TransactionStore,
    transaction_id: &str,
    request: UpdateTransactionRequest,
) -> Result<Transaction, AppError> {
    let id = parse_id(transaction_id).ok_or(AppError::TransactionNotFound)?;
    if transactions.find_by_id(id).await?.is_none() {
        return Err(AppError::TransactionNotFound);
    }
    let patch = TransactionPatch::from_request(request)?;

    let updated = transactions
        .update(id, &patch)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    tracing::info!(transaction_id = %updated.id, "transaction updated");

    Ok(updated)
}

/// Delete a transaction and drop its id from the user's reference list.
///
/// # Process
///
/// 1. Resolve the user
/// 2. Delete the transaction
/// 3. Remove every occurrence of its id from the user's list
///
/// # Errors
///
/// - `UserNotFound`: `userId` does not resolve
/// - `TransactionNotFound`: no transaction with this id; the user's list is
///   left untouched
pub async fn delete_transaction(
    users: &dyn UserStore,
    transactions: &dyn TransactionStore,
    transaction_id: &str,
    user_id: Option<&str>,
) -> Result<(), AppError> {
    let user = match user_id.and_then(parse_id) {
        Some(user_id) => users.find_by_id(user_id).await?,
        None => None,
    }
    .ok_or(AppError::UserNotFound)?;

    let deleted = match parse_id(transaction_id) {
        Some(id) => transactions.delete(id).await?,
        None => None,
    }
    .ok_or(AppError::TransactionNotFound)?;

    if let Err(e) = users.remove_transaction_ref(user.id, deleted.id).await {
        tracing::error!(
            transaction_id = %deleted.id,
            user_id = %user.id,
            error = %e,
            "transaction deleted but owner's reference list was not updated"
        );
        return Err(e);
    }

    tracing::info!(transaction_id = %deleted.id, user_id = %user.id, "transaction deleted");

    Ok(())
}
