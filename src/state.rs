//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    db::DbPool,
    store::{
        TransactionStore, UserStore,
        postgres::{PgTransactionStore, PgUserStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub transactions: Arc<dyn TransactionStore>,
    /// bcrypt cost factor used when registering users
    pub password_cost: u32,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        transactions: Arc<dyn TransactionStore>,
        password_cost: u32,
    ) -> Self {
        Self {
            users,
            transactions,
            password_cost,
        }
    }

    /// State backed by the PostgreSQL stores sharing one pool.
    pub fn postgres(pool: DbPool, password_cost: u32) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgTransactionStore::new(pool)),
            password_cost,
        )
    }
}
