//! External bank collaborator client
//!
//! The core calls the bank to open a payment session; the bank later
//! calls our settlement callback with the token we issued. The network
//! timeout here is deliberately short and independent of any storage
//! transaction timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

use crate::config::BankConfig;
use crate::error::WalletError;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("bank request failed: {0}")]
    Network(String),
    #[error("bank rejected session: {0}")]
    Rejected(String),
}

impl From<BankError> for WalletError {
    fn from(e: BankError) -> Self {
        WalletError::BankUnavailable(e.to_string())
    }
}

/// What we send the bank to open a payment session
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest {
    pub token: String,
    pub account_id: i64,
    /// Integer paise
    pub amount: u64,
    pub provider: String,
    pub callback_url: String,
}

/// What the bank hands back
#[derive(Debug, Deserialize)]
pub struct PaymentSession {
    pub payment_url: String,
}

#[async_trait]
pub trait BankClient: Send + Sync + Debug {
    /// Open a payment session; the returned URL is where the end user pays.
    async fn create_session(&self, req: &CreateSessionRequest)
    -> Result<PaymentSession, BankError>;
}

/// HTTP client for a real bank endpoint
#[derive(Debug)]
pub struct HttpBankClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBankClient {
    pub fn new(cfg: &BankConfig) -> Result<Self, BankError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| BankError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }
}

#[async_trait]
impl BankClient for HttpBankClient {
    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<PaymentSession, BankError> {
        let url = format!("{}/sessions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| BankError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BankError::Rejected(format!("{status}: {body}")));
        }

        resp.json::<PaymentSession>()
            .await
            .map_err(|e| BankError::Network(e.to_string()))
    }
}

/// In-process bank simulator. The payment URL points at the simulator's
/// pay page, keyed by the settlement token exactly like the real bank.
#[cfg(feature = "mock-bank")]
#[derive(Debug)]
pub struct MockBankClient {
    base_url: String,
}

#[cfg(feature = "mock-bank")]
impl MockBankClient {
    pub fn new(cfg: &BankConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
        }
    }
}

#[cfg(feature = "mock-bank")]
#[async_trait]
impl BankClient for MockBankClient {
    async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<PaymentSession, BankError> {
        Ok(PaymentSession {
            payment_url: format!("{}/payment?token={}", self.base_url, req.token),
        })
    }
}

#[cfg(all(test, feature = "mock-bank"))]
mod tests {
    use super::*;
    use crate::config::BankConfig;

    #[tokio::test]
    async fn test_mock_bank_embeds_token_in_payment_url() {
        let client = MockBankClient::new(&BankConfig::default());
        let session = client
            .create_session(&CreateSessionRequest {
                token: "tok123".to_string(),
                account_id: 7,
                amount: 2000,
                provider: "HDFC".to_string(),
                callback_url: "http://localhost:8080/api/v1/onramp/callback".to_string(),
            })
            .await
            .unwrap();
        assert!(session.payment_url.contains("token=tok123"));
    }
}
