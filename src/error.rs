//! Wallet error taxonomy
//!
//! Every failure in the money-movement core maps to one of these kinds.
//! The gateway owns the single translation layer from kind to HTTP
//! status + numeric error code; nothing else formats errors for clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Bad input shape or range. Rejected before any mutation.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Unknown account, token or transfer. No mutation occurred.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Business rule: sender cannot cover the amount. Surfaced verbatim.
    #[error("insufficient balance")]
    InsufficientFunds,

    /// Self-transfer, risk-blocked transfer, or a duplicate callback that
    /// was already settled. Rejected or acknowledged as a no-op.
    #[error("{0}")]
    Conflict(String),

    /// A balance went negative or a CAS that must succeed did not.
    /// Indicates a bug in the Transfer Engine itself. Fatal, never retried.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Storage-level failure. Nothing partial was committed, so the whole
    /// unit of work is safe to retry.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The external bank collaborator could not be reached in time.
    #[error("bank unavailable: {0}")]
    BankUnavailable(String),
}

impl WalletError {
    /// Whether retrying the whole unit of work can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WalletError::Storage(_) | WalletError::BankUnavailable(_)
        )
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        WalletError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        WalletError::Conflict(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        WalletError::InvariantViolation(msg.into())
    }
}

/// Retry a fallible unit of work a bounded number of times with backoff.
///
/// Only transient errors are retried; business-rule failures and
/// invariant violations surface immediately. Callers pass a closure that
/// runs the entire unit of work, since nothing partial survives an abort.
pub async fn retry_transient<T, F, Fut>(
    max_attempts: u32,
    mut op: F,
) -> Result<T, WalletError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, WalletError>>,
{
    let mut delay_ms = 50u64;
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                tracing::warn!(attempt, error = %e, "transient failure, retrying");
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                delay_ms = (delay_ms * 2).min(1000);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(WalletError::Storage(sqlx::Error::PoolTimedOut).is_transient());
        assert!(WalletError::BankUnavailable("timeout".into()).is_transient());
        assert!(!WalletError::InsufficientFunds.is_transient());
        assert!(!WalletError::invariant("locked underflow").is_transient());
        assert!(!WalletError::validation("bad amount").is_transient());
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = retry_transient(3, || {
            calls += 1;
            async { Err(WalletError::BankUnavailable("down".into())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_retry_does_not_retry_business_errors() {
        let mut calls = 0;
        let result: Result<(), _> = retry_transient(3, || {
            calls += 1;
            async { Err(WalletError::InsufficientFunds) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
