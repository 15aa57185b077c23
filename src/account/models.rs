//! Data models for wallet account management

use chrono::{DateTime, Utc};

/// Account status. Accounts are never deleted, only archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum AccountStatus {
    Archived = 0,
    Active = 1,
}

impl AccountStatus {
    /// Unknown discriminants are not coerced; a corrupt status value
    /// must never come back as the most permissive state.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(AccountStatus::Archived),
            1 => Some(AccountStatus::Active),
            _ => None,
        }
    }
}

/// Wallet holder
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: i64,
    pub phone_number: String,
    pub email: String,
    pub name: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_status_from_i16() {
        assert_eq!(AccountStatus::from_i16(0), Some(AccountStatus::Archived));
        assert_eq!(AccountStatus::from_i16(1), Some(AccountStatus::Active));
        assert_eq!(AccountStatus::from_i16(99), None);
    }
}
