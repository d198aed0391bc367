//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /api/v1/addTransaction - Record a transaction for a user
//! - POST /api/v1/getTransaction - List a user's transactions with filters
//! - PUT /api/v1/updateTransaction/{id} - Partially update a transaction
//! - POST /api/v1/deleteTransaction/{id} - Delete a transaction
//!
//! Errors are wrapped in [`TransactionApiError`], which keeps the status
//! codes existing clients of these endpoints expect. Bodies that fail to
//! deserialize are reported the same way.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::{
    error::TransactionApiError,
    models::transaction::{
        CreateTransactionRequest, DeleteTransactionRequest, ListTransactionsRequest,
        MessageResponse, TransactionEnvelope, TransactionListResponse, UpdateTransactionRequest,
    },
    services::transaction_service,
    state::AppState,
};

/// Add a transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Coffee",
///   "amount": 4.5,
///   "description": "Flat white",
///   "date": "2024-01-15",
///   "category": "Food",
///   "userId": "550e8400-...",
///   "transactionType": "expense",
///   "paymentMethod": "card",
///   "notes": "optional"
/// }
/// ```
///
/// # Response
///
/// - **200**: `{success: true, message, transaction}`
/// - **408**: a required field is missing
/// - **400**: user not found
/// - **401**: any other failure, including a malformed body
pub async fn add_transaction(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<
        Json<CreateTransactionRequest>,
        TransactionApiError,
    >,
) -> Result<Json<TransactionEnvelope>, TransactionApiError> {
    let transaction = transaction_service::create_transaction(
        state.users.as_ref(),
        state.transactions.as_ref(),
        request,
    )
    .await?;

    Ok(Json(TransactionEnvelope::new(
        "Transaction Added Successfully",
        transaction,
    )))
}

/// List a user's transactions.
///
/// # Request Body
///
/// ```json
/// {
///   "userId": "550e8400-...",
///   "type": "all",
///   "frequency": "custom",
///   "startDate": "2024-01-01",
///   "endDate": "2024-01-31"
/// }
/// ```
pub async fn get_transactions(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<
        Json<ListTransactionsRequest>,
        TransactionApiError,
    >,
) -> Result<Json<TransactionListResponse>, TransactionApiError> {
    let transactions = transaction_service::list_transactions(
        state.users.as_ref(),
        state.transactions.as_ref(),
        request,
        Utc::now(),
    )
    .await?;

    Ok(Json(TransactionListResponse {
        success: true,
        transactions,
    }))
}

/// Update the truthy fields of a transaction.
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    WithRejection(Json(request), _): WithRejection<
        Json<UpdateTransactionRequest>,
        TransactionApiError,
    >,
) -> Result<Json<TransactionEnvelope>, TransactionApiError> {
    let transaction = transaction_service::update_transaction(
        state.transactions.as_ref(),
        &transaction_id,
        request,
    )
    .await?;

    Ok(Json(TransactionEnvelope::new(
        "Transaction Updated Successfully",
        transaction,
    )))
}

/// Delete a transaction owned by `userId`.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    WithRejection(Json(request), _): WithRejection<
        Json<DeleteTransactionRequest>,
        TransactionApiError,
    >,
) -> Result<Json<MessageResponse>, TransactionApiError> {
    transaction_service::delete_transaction(
        state.users.as_ref(),
        state.transactions.as_ref(),
        &transaction_id,
        request.user_id.as_deref(),
    )
    .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Transaction successfully deleted".to_string(),
    }))
}
