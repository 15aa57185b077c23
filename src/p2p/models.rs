//! P2P transfer record types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Transfer ID - ULID-based unique identifier
///
/// Monotonic, sortable, no coordination needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferId(ulid::Ulid);

impl TransferId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransferId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// P2P transfer lifecycle. PENDING is never observable outside the
/// unit of work; BLOCKED transfers never held funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    Blocked,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Failed => "FAILED",
            TransferStatus::Blocked => "BLOCKED",
        }
    }
}

/// One peer-to-peer movement as stored
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct P2pTransfer {
    pub transfer_id: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    /// Integer paise
    pub amount: i64,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_id_round_trip() {
        let id = TransferId::new();
        let parsed: TransferId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_transfer_id_rejects_garbage() {
        assert!("not-a-ulid!".parse::<TransferId>().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransferStatus::Completed).unwrap(),
            r#""COMPLETED""#
        );
        assert_eq!(TransferStatus::Blocked.as_str(), "BLOCKED");
    }
}
