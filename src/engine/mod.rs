//! Transfer Engine - atomic balance mutations + paired ledger writes
//!
//! The only component that touches `balances` and `ledger_entries`.
//! Every operation runs on the caller's `PgConnection`, so the calling
//! protocol owns the transaction boundary: all steps of one transfer
//! commit or roll back together.
//!
//! Locking discipline: `lock_balances` acquires row locks in ascending
//! account-id order. Callers lock every account a transfer touches up
//! front, then mutate; later `FOR UPDATE` reads inside the same
//! transaction re-use the held locks.

use std::collections::HashMap;

use sqlx::{PgConnection, Row};

use crate::balance::Balance;
use crate::error::WalletError;
use crate::ledger::{Direction, LedgerStore, TxType};

pub struct TransferEngine;

impl TransferEngine {
    /// Lock the balance rows for the given accounts, ascending id order.
    ///
    /// Returns the locked snapshots. A missing row means the account's
    /// wallet was never initialized.
    ///
    /// One row per statement: a single set query with ORDER BY does not
    /// promise the lock-acquisition order under every plan, a sorted
    /// loop does.
    pub async fn lock_balances(
        conn: &mut PgConnection,
        account_ids: &[i64],
    ) -> Result<HashMap<i64, Balance>, WalletError> {
        let mut ids = account_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut balances = HashMap::with_capacity(ids.len());
        for id in ids {
            let balance = Self::fetch_locked(conn, id).await?;
            balances.insert(id, balance);
        }

        Ok(balances)
    }

    /// Move `amount` from available to locked for the account.
    ///
    /// The insufficient-funds check runs on the freshly locked row, not
    /// on any earlier read, closing the check-then-mutate race.
    pub async fn reserve(
        conn: &mut PgConnection,
        account_id: i64,
        amount: u64,
    ) -> Result<(), WalletError> {
        let mut balance = Self::fetch_locked(conn, account_id).await?;
        balance.reserve(amount)?;
        Self::store(conn, account_id, &balance).await
    }

    /// Move `amount` back from locked to available (abandoned reservation).
    pub async fn release_reserved(
        conn: &mut PgConnection,
        account_id: i64,
        amount: u64,
    ) -> Result<(), WalletError> {
        let mut balance = Self::fetch_locked(conn, account_id).await?;
        balance.release_reserved(amount)?;
        Self::store(conn, account_id, &balance).await
    }

    /// Permanently remove `amount` from locked and append the DEBIT entry.
    pub async fn settle_debit(
        conn: &mut PgConnection,
        account_id: i64,
        amount: u64,
        tx_type: TxType,
        tx_ref: &str,
    ) -> Result<(), WalletError> {
        let mut balance = Self::fetch_locked(conn, account_id).await?;
        balance.settle_reserved(amount)?;
        Self::store(conn, account_id, &balance).await?;
        LedgerStore::append(conn, account_id, amount, Direction::Debit, tx_type, tx_ref).await?;
        Ok(())
    }

    /// Increment available by `amount` and append the CREDIT entry.
    pub async fn credit(
        conn: &mut PgConnection,
        account_id: i64,
        amount: u64,
        tx_type: TxType,
        tx_ref: &str,
    ) -> Result<(), WalletError> {
        let mut balance = Self::fetch_locked(conn, account_id).await?;
        balance.credit(amount)?;
        Self::store(conn, account_id, &balance).await?;
        LedgerStore::append(conn, account_id, amount, Direction::Credit, tx_type, tx_ref).await?;
        Ok(())
    }

    /// Read one balance row under lock.
    async fn fetch_locked(
        conn: &mut PgConnection,
        account_id: i64,
    ) -> Result<Balance, WalletError> {
        let row = sqlx::query(
            r#"SELECT available, locked FROM balances WHERE account_id = $1 FOR UPDATE"#,
        )
        .bind(account_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(WalletError::NotFound("wallet"))?;

        Balance::from_row(row.get("available"), row.get("locked"))
    }

    /// Write one balance row back.
    async fn store(
        conn: &mut PgConnection,
        account_id: i64,
        balance: &Balance,
    ) -> Result<(), WalletError> {
        let result = sqlx::query(
            r#"UPDATE balances SET available = $1, locked = $2, updated_at = NOW()
               WHERE account_id = $3"#,
        )
        .bind(balance.available() as i64)
        .bind(balance.locked() as i64)
        .bind(account_id)
        .execute(conn)
        .await?;

        if result.rows_affected() != 1 {
            // The row existed under fetch_locked; losing it mid-transaction
            // is not a condition we can recover from.
            return Err(WalletError::invariant(format!(
                "balance row for account {account_id} vanished during update"
            )));
        }
        Ok(())
    }

    /// Read a balance snapshot without locking (read path for queries).
    pub async fn read_balance(
        conn: &mut PgConnection,
        account_id: i64,
    ) -> Result<Balance, WalletError> {
        let row = sqlx::query(r#"SELECT available, locked FROM balances WHERE account_id = $1"#)
            .bind(account_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(WalletError::NotFound("wallet"))?;

        Balance::from_row(row.get("available"), row.get("locked"))
    }
}
