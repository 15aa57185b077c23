//! Ledger row types
//!
//! One immutable row per account per money movement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Movement direction relative to the owning account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "CREDIT",
            Direction::Debit => "DEBIT",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "CREDIT" => Some(Direction::Credit),
            "DEBIT" => Some(Direction::Debit),
            _ => None,
        }
    }
}

/// Originating transfer kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    Onramp,
    P2pTransfer,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Onramp => "ONRAMP",
            TxType::P2pTransfer => "P2P_TRANSFER",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "ONRAMP" => Some(TxType::Onramp),
            "P2P_TRANSFER" => Some(TxType::P2pTransfer),
            _ => None,
        }
    }
}

/// Immutable ledger fact. Created once, never updated or deleted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerEntry {
    pub entry_id: i64,
    pub account_id: i64,
    /// Positive amount in integer paise
    pub amount: i64,
    pub direction: Direction,
    pub tx_type: TxType,
    /// Identifier of the originating P2P transfer or on-ramp transaction
    pub tx_ref: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        for d in [Direction::Credit, Direction::Debit] {
            assert_eq!(Direction::from_str_opt(d.as_str()), Some(d));
        }
        assert_eq!(Direction::from_str_opt("SIDEWAYS"), None);
    }

    #[test]
    fn test_tx_type_round_trip() {
        for t in [TxType::Onramp, TxType::P2pTransfer] {
            assert_eq!(TxType::from_str_opt(t.as_str()), Some(t));
        }
        assert_eq!(TxType::from_str_opt("REFUND"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Direction::Credit).unwrap(),
            r#""CREDIT""#
        );
        assert_eq!(
            serde_json::to_string(&TxType::P2pTransfer).unwrap(),
            r#""P2P_TRANSFER""#
        );
    }
}
