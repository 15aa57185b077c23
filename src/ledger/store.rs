//! Ledger Store - append and read operations
//!
//! Appends happen only from the Transfer Engine, inside the same
//! transaction as the balance mutation they record. Reads sit outside
//! the write path.

use sqlx::{PgConnection, PgPool, Row};

use super::models::{Direction, LedgerEntry, TxType};
use crate::error::WalletError;

pub struct LedgerStore;

impl LedgerStore {
    /// Append one entry on the caller's connection (and transaction).
    pub async fn append(
        conn: &mut PgConnection,
        account_id: i64,
        amount: u64,
        direction: Direction,
        tx_type: TxType,
        tx_ref: &str,
    ) -> Result<i64, WalletError> {
        let entry_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO ledger_entries (account_id, amount, direction, tx_type, tx_ref)
               VALUES ($1, $2, $3, $4, $5) RETURNING entry_id"#,
        )
        .bind(account_id)
        .bind(amount as i64)
        .bind(direction.as_str())
        .bind(tx_type.as_str())
        .bind(tx_ref)
        .fetch_one(conn)
        .await?;

        Ok(entry_id)
    }

    /// Paginated history for one account, newest first.
    pub async fn history(
        pool: &PgPool,
        account_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<LedgerEntry>, i64), WalletError> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        let rows = sqlx::query(
            r#"SELECT entry_id, account_id, amount, direction, tx_type, tx_ref, created_at
               FROM ledger_entries
               WHERE account_id = $1
               ORDER BY created_at DESC, entry_id DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for r in &rows {
            entries.push(Self::row_to_entry(r)?);
        }

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ledger_entries WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await?;

        Ok((entries, total))
    }

    /// Most recent entry for one account, if any. Used by the
    /// payment-status confirmation view.
    pub async fn latest(
        pool: &PgPool,
        account_id: i64,
    ) -> Result<Option<LedgerEntry>, WalletError> {
        let row = sqlx::query(
            r#"SELECT entry_id, account_id, amount, direction, tx_type, tx_ref, created_at
               FROM ledger_entries
               WHERE account_id = $1
               ORDER BY created_at DESC, entry_id DESC
               LIMIT 1"#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        row.map(|r| Self::row_to_entry(&r)).transpose()
    }

    /// Sum of CREDITs minus sum of DEBITs for one account.
    ///
    /// For a consistent store this equals the account's current
    /// available + locked minus its starting balance (conservation law).
    pub async fn net_for_account(pool: &PgPool, account_id: i64) -> Result<i64, WalletError> {
        let net = sqlx::query_scalar::<_, i64>(
            r#"SELECT COALESCE(SUM(CASE direction WHEN 'CREDIT' THEN amount ELSE -amount END), 0)
               FROM ledger_entries WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_one(pool)
        .await?;

        Ok(net)
    }

    fn row_to_entry(r: &sqlx::postgres::PgRow) -> Result<LedgerEntry, WalletError> {
        let direction_str: String = r.get("direction");
        let tx_type_str: String = r.get("tx_type");

        // Unknown discriminants mean the store holds rows this build
        // cannot interpret; surface loudly rather than mislabel money.
        let direction = Direction::from_str_opt(&direction_str).ok_or_else(|| {
            WalletError::invariant(format!("unknown ledger direction: {direction_str}"))
        })?;
        let tx_type = TxType::from_str_opt(&tx_type_str)
            .ok_or_else(|| WalletError::invariant(format!("unknown ledger tx_type: {tx_type_str}")))?;

        Ok(LedgerEntry {
            entry_id: r.get("entry_id"),
            account_id: r.get("account_id"),
            amount: r.get("amount"),
            direction,
            tx_type,
            tx_ref: r.get("tx_ref"),
            created_at: r.get("created_at"),
        })
    }
}
