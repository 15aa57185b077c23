//! Risk/Decision Gate
//!
//! Synchronous pre-commit policy check for P2P transfers. Records a
//! transfer intent, evaluates it against the configured ceiling, and
//! records the decision. A BLOCKED intent is a veto: the Transfer Engine
//! never sees the funds.

use sqlx::{PgConnection, Row};

use crate::error::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Blocked,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Blocked => "BLOCKED",
        }
    }
}

#[derive(Debug)]
pub struct IntentOutcome {
    pub intent_id: i64,
    pub decision: Decision,
    pub reason: &'static str,
}

pub struct RiskGate;

impl RiskGate {
    /// Evaluate a proposed transfer before any funds move.
    ///
    /// Writes the intent and its decision on the caller's connection so
    /// both survive even when the transfer itself is vetoed.
    pub async fn evaluate(
        conn: &mut PgConnection,
        sender_id: i64,
        receiver_id: i64,
        amount: u64,
        block_threshold: u64,
    ) -> Result<IntentOutcome, WalletError> {
        let intent_id = sqlx::query(
            r#"INSERT INTO transaction_intents (sender_id, receiver_id, amount)
               VALUES ($1, $2, $3) RETURNING intent_id"#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(amount as i64)
        .fetch_one(&mut *conn)
        .await?
        .get::<i64, _>("intent_id");

        let (decision, reason) = Self::decide(amount, block_threshold);

        sqlx::query(
            r#"INSERT INTO transaction_decisions (intent_id, decision, reason)
               VALUES ($1, $2, $3)"#,
        )
        .bind(intent_id)
        .bind(decision.as_str())
        .bind(reason)
        .execute(&mut *conn)
        .await?;

        tracing::info!(
            intent_id,
            sender_id,
            receiver_id,
            amount,
            decision = decision.as_str(),
            "risk gate decision"
        );

        Ok(IntentOutcome {
            intent_id,
            decision,
            reason,
        })
    }

    /// Pure policy: amounts strictly above the threshold are blocked.
    pub fn decide(amount: u64, block_threshold: u64) -> (Decision, &'static str) {
        if amount > block_threshold {
            (
                Decision::Blocked,
                "Amount exceeds single-transaction limit",
            )
        } else {
            (Decision::Approved, "Amount within allowed limit")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_at_threshold_is_approved() {
        let (decision, _) = RiskGate::decide(100_000, 100_000);
        assert_eq!(decision, Decision::Approved);
    }

    #[test]
    fn test_amount_above_threshold_is_blocked() {
        let (decision, reason) = RiskGate::decide(100_001, 100_000);
        assert_eq!(decision, Decision::Blocked);
        assert_eq!(reason, "Amount exceeds single-transaction limit");
    }

    #[test]
    fn test_small_amount_is_approved() {
        let (decision, _) = RiskGate::decide(1, 100_000);
        assert_eq!(decision, Decision::Approved);
    }
}
