//! P2P Transfer Protocol
//!
//! Orchestrates one same-ledger transfer between two accounts. The whole
//! movement is one PostgreSQL transaction: transfer row, reservation,
//! credit, settlement and both ledger entries commit or roll back as a
//! unit, so no PENDING row and no half-applied balance is ever visible.

use sqlx::PgPool;

use super::models::{P2pTransfer, TransferId, TransferStatus};
use crate::account::AccountRepository;
use crate::config::WalletConfig;
use crate::engine::TransferEngine;
use crate::error::WalletError;
use crate::ledger::TxType;
use crate::risk::{Decision, RiskGate};

pub struct P2pService;

impl P2pService {
    /// Execute a P2P transfer from `sender_id` to the account owning
    /// `receiver_phone`.
    ///
    /// Guards, in order: amount positive and under the ceiling, receiver
    /// exists, no self-transfer, risk gate approval, sufficient available
    /// balance (re-checked under the row lock).
    pub async fn execute(
        pool: &PgPool,
        cfg: &WalletConfig,
        sender_id: i64,
        receiver_phone: &str,
        amount: u64,
    ) -> Result<P2pTransfer, WalletError> {
        if amount == 0 {
            return Err(WalletError::validation("amount must be positive"));
        }
        if amount > cfg.p2p_max_amount {
            return Err(WalletError::validation(format!(
                "amount exceeds per-transfer ceiling of {} paise",
                cfg.p2p_max_amount
            )));
        }

        let sender = AccountRepository::get_by_id(pool, sender_id)
            .await?
            .ok_or(WalletError::NotFound("sender account"))?;
        let receiver = AccountRepository::get_by_phone(pool, receiver_phone)
            .await?
            .ok_or(WalletError::NotFound("receiver account"))?;

        if sender.account_id == receiver.account_id {
            return Err(WalletError::conflict("cannot transfer to self"));
        }
        if !sender.is_active() {
            return Err(WalletError::conflict("sender account is archived"));
        }
        if !receiver.is_active() {
            return Err(WalletError::conflict("receiver account is archived"));
        }

        let transfer_id = TransferId::new();

        let mut tx = pool.begin().await?;

        // Pre-commit veto. The intent and decision rows ride in this
        // transaction; on a block we commit them with the BLOCKED
        // transfer row, and the balance rows are never touched.
        let outcome = RiskGate::evaluate(
            &mut *tx,
            sender.account_id,
            receiver.account_id,
            amount,
            cfg.risk_block_threshold,
        )
        .await?;

        if outcome.decision == Decision::Blocked {
            Self::insert_transfer(
                &mut *tx,
                &transfer_id,
                sender.account_id,
                receiver.account_id,
                amount,
                TransferStatus::Blocked,
            )
            .await?;
            tx.commit().await?;

            tracing::warn!(
                transfer_id = %transfer_id,
                sender_id = sender.account_id,
                amount,
                reason = outcome.reason,
                "transfer blocked by risk gate"
            );
            return Err(WalletError::conflict(format!(
                "transfer blocked: {}",
                outcome.reason
            )));
        }

        // Lock both balance rows in ascending id order before any check
        // or mutation. Two transfers moving money in opposite directions
        // between the same pair then contend in the same order.
        let balances =
            TransferEngine::lock_balances(&mut *tx, &[sender.account_id, receiver.account_id])
                .await?;

        // Re-verify under lock; the earlier reads carry no authority.
        let sender_balance = balances
            .get(&sender.account_id)
            .ok_or(WalletError::NotFound("wallet"))?;
        if sender_balance.available() < amount {
            return Err(WalletError::InsufficientFunds);
        }

        Self::insert_transfer(
            &mut *tx,
            &transfer_id,
            sender.account_id,
            receiver.account_id,
            amount,
            TransferStatus::Pending,
        )
        .await?;

        let tx_ref = transfer_id.to_string();
        TransferEngine::reserve(&mut *tx, sender.account_id, amount).await?;
        TransferEngine::credit(&mut *tx, receiver.account_id, amount, TxType::P2pTransfer, &tx_ref)
            .await?;
        TransferEngine::settle_debit(
            &mut *tx,
            sender.account_id,
            amount,
            TxType::P2pTransfer,
            &tx_ref,
        )
        .await?;

        sqlx::query(r#"UPDATE p2p_transfers SET status = 'COMPLETED' WHERE transfer_id = $1"#)
            .bind(&tx_ref)
            .execute(&mut *tx)
            .await?;

        let record = Self::fetch(&mut *tx, &transfer_id).await?;
        tx.commit().await?;

        tracing::info!(
            transfer_id = %transfer_id,
            sender_id = sender.account_id,
            receiver_id = receiver.account_id,
            amount,
            "p2p transfer completed"
        );

        Ok(record)
    }

    async fn insert_transfer(
        conn: &mut sqlx::PgConnection,
        transfer_id: &TransferId,
        sender_id: i64,
        receiver_id: i64,
        amount: u64,
        status: TransferStatus,
    ) -> Result<(), WalletError> {
        sqlx::query(
            r#"INSERT INTO p2p_transfers (transfer_id, sender_id, receiver_id, amount, status)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(transfer_id.to_string())
        .bind(sender_id)
        .bind(receiver_id)
        .bind(amount as i64)
        .bind(status.as_str())
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn fetch(
        conn: &mut sqlx::PgConnection,
        transfer_id: &TransferId,
    ) -> Result<P2pTransfer, WalletError> {
        use sqlx::Row;

        let row = sqlx::query(
            r#"SELECT transfer_id, sender_id, receiver_id, amount, status, created_at
               FROM p2p_transfers WHERE transfer_id = $1"#,
        )
        .bind(transfer_id.to_string())
        .fetch_one(conn)
        .await?;

        let status_str: String = row.get("status");
        let status = match status_str.as_str() {
            "PENDING" => TransferStatus::Pending,
            "COMPLETED" => TransferStatus::Completed,
            "FAILED" => TransferStatus::Failed,
            "BLOCKED" => TransferStatus::Blocked,
            other => {
                return Err(WalletError::invariant(format!(
                    "unknown transfer status: {other}"
                )));
            }
        };

        Ok(P2pTransfer {
            transfer_id: row.get("transfer_id"),
            sender_id: row.get("sender_id"),
            receiver_id: row.get("receiver_id"),
            amount: row.get("amount"),
            status,
            created_at: row.get("created_at"),
        })
    }

    /// Look up one transfer by id (status endpoint).
    pub async fn get(pool: &PgPool, transfer_id: &TransferId) -> Result<Option<P2pTransfer>, WalletError> {
        let mut conn = pool.acquire().await?;
        match Self::fetch(&mut *conn, transfer_id).await {
            Ok(t) => Ok(Some(t)),
            Err(WalletError::Storage(sqlx::Error::RowNotFound)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
