//! In-memory stores used as test doubles.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        filter::TransactionFilter,
        transaction::{NewTransaction, Transaction, TransactionPatch},
        user::{NewUser, User, UserSummary},
    },
    store::{TransactionStore, UserStore},
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    fail_next_reference_write: AtomicBool,
    yield_after_lookup: AtomicBool,
}

impl MemoryUserStore {
    /// Make the next reference-list write fail with a database error.
    pub fn fail_next_reference_write(&self) {
        self.fail_next_reference_write.store(true, Ordering::SeqCst);
    }

    /// Yield to the runtime after every `find_by_id`, so concurrent requests
    /// interleave between reading a user and writing to it.
    pub fn yield_after_lookup(&self) {
        self.yield_after_lookup.store(true, Ordering::SeqCst);
    }

    fn take_reference_write_failure(&self) -> Result<(), AppError> {
        if self.fail_next_reference_write.swap(false, Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn count_with_email(&self, email: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .count()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = self.users.lock().unwrap().iter().find(|u| u.id == id).cloned();
        if self.yield_after_lookup.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_avatar_image_set: false,
            avatar_image: String::new(),
            transaction_ids: Vec::new(),
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn push_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError> {
        self.take_reference_write_failure()?;

        let mut users = self.users.lock().unwrap();
        if let Some(stored) = users.iter_mut().find(|u| u.id == user_id) {
            stored.transaction_ids.push(transaction_id);
        }

        Ok(())
    }

    async fn remove_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError> {
        self.take_reference_write_failure()?;

        let mut users = self.users.lock().unwrap();
        if let Some(stored) = users.iter_mut().find(|u| u.id == user_id) {
            stored.transaction_ids.retain(|id| *id != transaction_id);
        }

        Ok(())
    }

    async fn set_avatar(&self, id: Uuid, image: &str) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.is_avatar_image_set = true;
            user.avatar_image = image.to_string();
            user.clone()
        }))
    }

    async fn list_except(&self, id: Uuid) -> Result<Vec<UserSummary>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id != id)
            .map(UserSummary::from)
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTransactionStore {
    transactions: Mutex<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    /// Insert a fully formed record, bypassing id and timestamp generation.
    pub fn put(&self, transaction: Transaction) {
        self.transactions.lock().unwrap().push(transaction);
    }

    pub fn len(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction, AppError> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            title: new_transaction.title,
            amount: new_transaction.amount,
            description: new_transaction.description,
            category: new_transaction.category,
            date: new_transaction.date,
            transaction_type: new_transaction.transaction_type,
            payment_method: new_transaction.payment_method,
            notes: new_transaction.notes,
            user_id: new_transaction.user_id,
            created_at: Utc::now(),
        };
        self.transactions.lock().unwrap().push(transaction.clone());

        Ok(transaction)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, AppError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &TransactionPatch,
    ) -> Result<Option<Transaction>, AppError> {
        let mut transactions = self.transactions.lock().unwrap();
        Ok(transactions.iter_mut().find(|t| t.id == id).map(|stored| {
            patch.clone().apply(stored);
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let mut transactions = self.transactions.lock().unwrap();
        Ok(transactions
            .iter()
            .position(|t| t.id == id)
            .map(|index| transactions.remove(index)))
    }
}
