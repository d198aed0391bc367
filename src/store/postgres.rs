//! PostgreSQL-backed stores.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        filter::TransactionFilter,
        transaction::{NewTransaction, Transaction, TransactionPatch},
        user::{NewUser, User, UserSummary},
    },
    store::{TransactionStore, UserStore},
};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, is_avatar_image_set, avatar_image, transaction_ids, created_at";

const TRANSACTION_COLUMNS: &str = "id, title, amount, description, category, date, transaction_type, payment_method, notes, user_id, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            // Lost the race against a concurrent registration for the same email
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn push_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET transaction_ids = array_append(transaction_ids, $1)
            WHERE id = $2
            "#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_transaction_ref(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET transaction_ids = array_remove(transaction_ids, $1)
            WHERE id = $2
            "#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_avatar(&self, id: Uuid, image: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_avatar_image_set = TRUE,
                avatar_image = $1
            WHERE id = $2
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_except(&self, id: Uuid) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, email, first_name, last_name, avatar_image
            FROM users
            WHERE id <> $1
            ORDER BY created_at
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (
                id,
                title,
                amount,
                description,
                category,
                date,
                transaction_type,
                payment_method,
                notes,
                user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_transaction.title)
        .bind(new_transaction.amount)
        .bind(new_transaction.description)
        .bind(new_transaction.category)
        .bind(new_transaction.date)
        .bind(new_transaction.transaction_type)
        .bind(new_transaction.payment_method)
        .bind(new_transaction.notes)
        .bind(new_transaction.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = "
        ));
        query.push_bind(filter.user_id);

        if let Some(ref transaction_type) = filter.transaction_type {
            query
                .push(" AND transaction_type = ")
                .push_bind(transaction_type.clone());
        }
        if let Some(from) = filter.range.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filter.range.to {
            query.push(" AND date <= ").push_bind(to);
        }
        query.push(" ORDER BY created_at");

        let transactions = query
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        Ok(transactions)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &TransactionPatch,
    ) -> Result<Option<Transaction>, AppError> {
        // NULL keeps the stored value; user_id is never in the SET list
        let updated = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET title = COALESCE($1, title),
                amount = COALESCE($2, amount),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                date = COALESCE($5, date),
                transaction_type = COALESCE($6, transaction_type),
                payment_method = COALESCE($7, payment_method),
                notes = COALESCE($8, notes)
            WHERE id = $9
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(&patch.title)
        .bind(patch.amount)
        .bind(&patch.description)
        .bind(&patch.category)
        .bind(patch.date)
        .bind(&patch.transaction_type)
        .bind(&patch.payment_method)
        .bind(&patch.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let deleted = sqlx::query_as::<_, Transaction>(&format!(
            "DELETE FROM transactions WHERE id = $1 RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
