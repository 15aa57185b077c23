//! Repository layer for account lookups and registration

use super::models::{Account, AccountStatus};
use crate::error::WalletError;
use sqlx::{PgPool, Row};

/// Account repository for CRUD operations
pub struct AccountRepository;

impl AccountRepository {
    /// Get account by ID
    pub async fn get_by_id(
        pool: &PgPool,
        account_id: i64,
    ) -> Result<Option<Account>, WalletError> {
        let row = sqlx::query(
            r#"SELECT account_id, phone_number, email, name, status, created_at
               FROM accounts WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    /// Get account by phone number (the external transfer identifier)
    pub async fn get_by_phone(
        pool: &PgPool,
        phone: &str,
    ) -> Result<Option<Account>, WalletError> {
        let row = sqlx::query(
            r#"SELECT account_id, phone_number, email, name, status, created_at
               FROM accounts WHERE phone_number = $1"#,
        )
        .bind(phone)
        .fetch_optional(pool)
        .await?;

        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    /// Create a new account together with its zero balance row.
    ///
    /// One transaction: an account must never exist without a wallet.
    pub async fn create(
        pool: &PgPool,
        phone_number: &str,
        email: &str,
        name: &str,
    ) -> Result<i64, WalletError> {
        let mut tx = pool.begin().await?;

        let account_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO accounts (phone_number, email, name)
               VALUES ($1, $2, $3) RETURNING account_id"#,
        )
        .bind(phone_number)
        .bind(email)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r#"INSERT INTO balances (account_id, available, locked) VALUES ($1, 0, 0)"#)
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(account_id)
    }

    /// Soft-archive an account. Rows are never deleted.
    pub async fn archive(pool: &PgPool, account_id: i64) -> Result<bool, WalletError> {
        let result = sqlx::query(r#"UPDATE accounts SET status = 0 WHERE account_id = $1"#)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_account(r: &sqlx::postgres::PgRow) -> Result<Account, WalletError> {
        let status_raw: i16 = r.get("status");
        let status = AccountStatus::from_i16(status_raw).ok_or_else(|| {
            WalletError::invariant(format!("unknown account status: {status_raw}"))
        })?;

        Ok(Account {
            account_id: r.get("account_id"),
            phone_number: r.get("phone_number"),
            email: r.get("email"),
            name: r.get("name"),
            status,
            created_at: r.get("created_at"),
        })
    }
}
