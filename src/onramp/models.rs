//! On-ramp transaction types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Deposit lifecycle. Transitions are one-way; Success and Failed are
/// terminal and gate the idempotency check on repeated callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OnRampStatus {
    Processing,
    Success,
    Failed,
}

impl OnRampStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnRampStatus::Processing => "Processing",
            OnRampStatus::Success => "Success",
            OnRampStatus::Failed => "Failed",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Processing" => Some(OnRampStatus::Processing),
            "Success" => Some(OnRampStatus::Success),
            "Failed" => Some(OnRampStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OnRampStatus::Processing)
    }
}

/// Outcome reported by the bank callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CallbackOutcome {
    Success,
    Failed,
}

/// One deposit-in-progress as stored
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OnRampTransaction {
    pub onramp_id: String,
    pub account_id: i64,
    /// Integer paise
    pub amount: i64,
    pub provider: String,
    /// Single-use idempotency key issued to the bank; immutable once set
    pub token: String,
    pub status: OnRampStatus,
    pub created_at: DateTime<Utc>,
}

/// How a settlement callback was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackResolution {
    /// First delivery, balance credited
    Credited,
    /// First delivery, marked failed, no balance change
    MarkedFailed,
    /// Repeat delivery of an already-settled token; acknowledged, no-op
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            OnRampStatus::Processing,
            OnRampStatus::Success,
            OnRampStatus::Failed,
        ] {
            assert_eq!(OnRampStatus::from_str_opt(s.as_str()), Some(s));
        }
        assert_eq!(OnRampStatus::from_str_opt("Cancelled"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OnRampStatus::Processing.is_terminal());
        assert!(OnRampStatus::Success.is_terminal());
        assert!(OnRampStatus::Failed.is_terminal());
    }
}
