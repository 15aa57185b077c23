//! On-Ramp Settlement Protocol
//!
//! Two halves: `initiate` opens a payment session with the bank and
//! durably records the Processing transaction before anyone sees the
//! payment URL; `handle_callback` settles it when the bank reports the
//! outcome, idempotently, however many times the webhook is delivered.

use rand::RngCore;
use sqlx::{PgPool, Row};

use super::bank_client::{BankClient, CreateSessionRequest};
use super::models::{CallbackOutcome, CallbackResolution, OnRampStatus, OnRampTransaction};
use crate::account::AccountRepository;
use crate::config::{BankConfig, WalletConfig};
use crate::engine::TransferEngine;
use crate::error::WalletError;
use crate::ledger::TxType;

/// What `initiate` hands back to the caller
#[derive(Debug)]
pub struct InitiatedOnRamp {
    pub onramp_id: String,
    pub payment_url: String,
}

pub struct OnRampService;

impl OnRampService {
    /// Start a deposit: validate, issue a token, open the bank session,
    /// persist the Processing row, return the payment URL.
    ///
    /// Ordering matters: the row commits before the URL is returned, so
    /// the token is durably known before any callback can arrive. If the
    /// bank call fails no row is created at all.
    pub async fn initiate(
        pool: &PgPool,
        wallet_cfg: &WalletConfig,
        bank_cfg: &BankConfig,
        bank: &dyn BankClient,
        account_id: i64,
        amount: u64,
        provider: &str,
    ) -> Result<InitiatedOnRamp, WalletError> {
        if amount < wallet_cfg.onramp_min_amount || amount > wallet_cfg.onramp_max_amount {
            return Err(WalletError::validation(format!(
                "amount must be between {} and {} paise",
                wallet_cfg.onramp_min_amount, wallet_cfg.onramp_max_amount
            )));
        }
        if !wallet_cfg
            .allowed_providers
            .iter()
            .any(|p| p.eq_ignore_ascii_case(provider))
        {
            return Err(WalletError::validation(format!(
                "unknown provider: {provider}"
            )));
        }

        let account = AccountRepository::get_by_id(pool, account_id)
            .await?
            .ok_or(WalletError::NotFound("account"))?;
        if !account.is_active() {
            return Err(WalletError::conflict("account is archived"));
        }

        let token = Self::generate_token();
        let onramp_id = ulid::Ulid::new().to_string();

        let session = bank
            .create_session(&CreateSessionRequest {
                token: token.clone(),
                account_id: account.account_id,
                amount,
                provider: provider.to_string(),
                callback_url: bank_cfg.callback_url.clone(),
            })
            .await?;

        sqlx::query(
            r#"INSERT INTO onramp_transactions (onramp_id, account_id, amount, provider, token, status)
               VALUES ($1, $2, $3, $4, $5, 'Processing')"#,
        )
        .bind(&onramp_id)
        .bind(account.account_id)
        .bind(amount as i64)
        .bind(provider)
        .bind(&token)
        .execute(pool)
        .await?;

        tracing::info!(
            onramp_id = %onramp_id,
            account_id = account.account_id,
            amount,
            provider,
            "onramp transaction initiated"
        );

        Ok(InitiatedOnRamp {
            onramp_id,
            payment_url: session.payment_url,
        })
    }

    /// Settle a bank callback. At-least-once, unordered delivery:
    /// the token's stored status is the only idempotency authority.
    ///
    /// One transaction covers the status CAS and (on success) the credit
    /// plus its ledger entry, so two near-simultaneous duplicates cannot
    /// both mutate the balance.
    pub async fn handle_callback(
        pool: &PgPool,
        token: &str,
        reported_account_id: i64,
        reported_amount: i64,
        outcome: CallbackOutcome,
    ) -> Result<CallbackResolution, WalletError> {
        let mut tx = pool.begin().await?;

        let row = sqlx::query(
            r#"SELECT onramp_id, account_id, amount, status FROM onramp_transactions
               WHERE token = $1 FOR UPDATE"#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WalletError::NotFound("onramp transaction"))?;

        let onramp_id: String = row.get("onramp_id");
        let account_id: i64 = row.get("account_id");
        let amount: i64 = row.get("amount");
        let status_str: String = row.get("status");
        let status = OnRampStatus::from_str_opt(&status_str)
            .ok_or_else(|| WalletError::invariant(format!("unknown onramp status: {status_str}")))?;

        // The callback is untrusted input; it must match what we issued.
        if reported_account_id != account_id {
            return Err(WalletError::validation(
                "callback account does not match transaction",
            ));
        }
        if reported_amount != amount {
            return Err(WalletError::validation(
                "callback amount does not match transaction",
            ));
        }

        // Idempotency gate: a settled token is acknowledged and ignored.
        if status.is_terminal() {
            tracing::info!(token, onramp_id = %onramp_id, "duplicate settlement callback ignored");
            return Ok(CallbackResolution::Duplicate);
        }

        let resolution = match outcome {
            CallbackOutcome::Failed => {
                Self::transition(&mut tx, token, OnRampStatus::Failed).await?;
                tracing::info!(token, onramp_id = %onramp_id, "onramp transaction failed");
                CallbackResolution::MarkedFailed
            }
            CallbackOutcome::Success => {
                TransferEngine::credit(&mut *tx, account_id, amount as u64, TxType::Onramp, &onramp_id)
                    .await?;
                Self::transition(&mut tx, token, OnRampStatus::Success).await?;
                tracing::info!(
                    token,
                    onramp_id = %onramp_id,
                    account_id,
                    amount,
                    "wallet credited from onramp"
                );
                CallbackResolution::Credited
            }
        };

        tx.commit().await?;
        Ok(resolution)
    }

    /// Compare-and-set Processing -> terminal. The row is locked, so a
    /// miss here means the one-way lifecycle was violated elsewhere.
    async fn transition(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        token: &str,
        to: OnRampStatus,
    ) -> Result<(), WalletError> {
        let result = sqlx::query(
            r#"UPDATE onramp_transactions SET status = $1
               WHERE token = $2 AND status = 'Processing'"#,
        )
        .bind(to.as_str())
        .bind(token)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() != 1 {
            return Err(WalletError::invariant(format!(
                "status CAS failed for token {token}: row no longer Processing under lock"
            )));
        }
        Ok(())
    }

    /// Look up one on-ramp transaction by its public id.
    pub async fn get(
        pool: &PgPool,
        onramp_id: &str,
    ) -> Result<Option<OnRampTransaction>, WalletError> {
        let row = sqlx::query(
            r#"SELECT onramp_id, account_id, amount, provider, token, status, created_at
               FROM onramp_transactions WHERE onramp_id = $1"#,
        )
        .bind(onramp_id)
        .fetch_optional(pool)
        .await?;

        row.map(|r| {
            let status_str: String = r.get("status");
            let status = OnRampStatus::from_str_opt(&status_str).ok_or_else(|| {
                WalletError::invariant(format!("unknown onramp status: {status_str}"))
            })?;
            Ok(OnRampTransaction {
                onramp_id: r.get("onramp_id"),
                account_id: r.get("account_id"),
                amount: r.get("amount"),
                provider: r.get("provider"),
                token: r.get("token"),
                status,
                created_at: r.get("created_at"),
            })
        })
        .transpose()
    }

    /// 32 random bytes, hex encoded. Unique per deposit, issued once.
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_hex() {
        let a = OnRampService::generate_token();
        let b = OnRampService::generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
