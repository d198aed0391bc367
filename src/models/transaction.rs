//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a financial record
//! - `NewTransaction`: validated fields for an insert
//! - Request types for add, list, update and delete operations
//! - `AmountField` / `FrequencyField`: values clients send as numbers or strings
//! - `TransactionPatch`: the partial update applied by the update operation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::present};

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction references exactly one
/// owning user through `user_id`, which never changes after creation.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "title": "Groceries",
///   "amount": 54.2,
///   "description": "Weekly shop",
///   "category": "Food",
///   "date": "2024-01-15T00:00:00Z",
///   "transactionType": "expense",
///   "paymentMethod": "card",
///   "notes": null,
///   "user": "550e8400-e29b-41d4-a716-446655440000",
///   "createdAt": "2024-01-15T09:12:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,

    pub title: String,

    pub amount: f64,

    pub description: String,

    pub category: String,

    /// When the transaction happened (used by the date filters)
    pub date: DateTime<Utc>,

    /// Free-form category such as "income" or "expense"
    pub transaction_type: String,

    pub payment_method: String,

    pub notes: Option<String>,

    /// Owning user
    #[serde(rename = "user")]
    pub user_id: Uuid,

    /// Insertion time; defines the default listing order
    pub created_at: DateTime<Utc>,
}

/// Validated fields for inserting a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub transaction_type: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub user_id: Uuid,
}

/// Request body for adding a transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Salary",
///   "amount": 3200,
///   "description": "January salary",
///   "date": "2024-01-31",
///   "category": "Work",
///   "userId": "550e8400-e29b-41d4-a716-446655440000",
///   "transactionType": "income",
///   "paymentMethod": "bank transfer",
///   "notes": "optional"
/// }
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<AmountField>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub user_id: Option<String>,
    pub transaction_type: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Request body for listing a user's transactions.
///
/// `type` is either `"all"` or an exact transaction type. `frequency` is
/// either `"custom"` (use `startDate`/`endDate`) or a number of days, sent as
/// a string or a number.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsRequest {
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub frequency: Option<FrequencyField>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `frequency` as it arrives on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FrequencyField {
    Days(i64),
    Text(String),
}

/// `amount` as it arrives on the wire. Form-driven clients send `"50"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    /// Whether the value counts as provided: a non-zero number or a
    /// non-empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            AmountField::Number(amount) => is_truthy_amount(*amount),
            AmountField::Text(text) => !text.is_empty(),
        }
    }

    /// The numeric value.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a string does not hold a number.
    pub fn to_f64(&self) -> Result<f64, AppError> {
        match self {
            AmountField::Number(amount) => Ok(*amount),
            AmountField::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::Validation(format!("Invalid amount: {text}"))),
        }
    }
}

impl From<f64> for AmountField {
    fn from(amount: f64) -> Self {
        AmountField::Number(amount)
    }
}

/// Request body for updating a transaction. Every field is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub title: Option<String>,
    pub amount: Option<AmountField>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Request body for deleting a transaction.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTransactionRequest {
    pub user_id: Option<String>,
}

/// Success body carrying a single transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub success: bool,
    pub message: String,
    pub transaction: Transaction,
}

impl TransactionEnvelope {
    pub fn new(message: impl Into<String>, transaction: Transaction) -> Self {
        Self {
            success: true,
            message: message.into(),
            transaction,
        }
    }
}

/// Success body for a listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub success: bool,
    pub transactions: Vec<Transaction>,
}

/// Success body with only a message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Partial update for a stored transaction.
///
/// Only truthy values overwrite: an absent field, an empty string or an
/// amount of zero leaves the stored value as it is. A field therefore cannot
/// be cleared through this path.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl TransactionPatch {
    /// Build a patch from an update request, parsing the date and amount if
    /// they were sent.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a non-empty date or amount cannot be parsed.
    pub fn from_request(request: UpdateTransactionRequest) -> Result<Self, AppError> {
        let date = match present(request.date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };
        let amount = match request.amount.filter(AmountField::is_truthy) {
            Some(amount) => Some(amount.to_f64()?),
            None => None,
        };

        Ok(Self {
            title: present(request.title),
            amount: amount.filter(|amount| is_truthy_amount(*amount)),
            description: present(request.description),
            date,
            category: present(request.category),
            transaction_type: present(request.transaction_type),
            payment_method: present(request.payment_method),
            notes: present(request.notes),
        })
    }

    /// Overwrite the fields of `transaction` this patch carries.
    ///
    /// `id`, `user_id` and `created_at` are never touched.
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(title) = present(self.title) {
            transaction.title = title;
        }
        if let Some(amount) = self.amount.filter(|amount| is_truthy_amount(*amount)) {
            transaction.amount = amount;
        }
        if let Some(description) = present(self.description) {
            transaction.description = description;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(category) = present(self.category) {
            transaction.category = category;
        }
        if let Some(transaction_type) = present(self.transaction_type) {
            transaction.transaction_type = transaction_type;
        }
        if let Some(payment_method) = present(self.payment_method) {
            transaction.payment_method = payment_method;
        }
        if let Some(notes) = present(self.notes) {
            transaction.notes = Some(notes);
        }
    }
}

/// Zero and NaN count as "not provided".
pub fn is_truthy_amount(amount: f64) -> bool {
    amount != 0.0 && !amount.is_nan()
}

/// Parse a client supplied date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC) and
/// plain `YYYY-MM-DD` dates (midnight UTC).
///
/// # Errors
///
/// Returns `Validation` if the value matches none of these forms.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("Invalid date: {raw}")))
}
