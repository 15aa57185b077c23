//! ENFORCED BALANCE TYPE
//!
//! Single source of truth for balance arithmetic. The Transfer Engine
//! loads a row under lock, mutates it through these methods, and writes
//! it back; no other code path touches the two amounts.
//!
//! # Enforcement Strategy:
//! 1. Fields are PRIVATE - no direct access
//! 2. All mutations return Result - errors are explicit
//! 3. checked_add/sub - overflow protection
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Wallet balance in integer minor units (paise)
///
/// # Invariants (ENFORCED by private fields):
/// - `available >= 0`, `locked >= 0`
/// - true holdings = available + locked (never negative)
/// - No overflow/underflow (checked arithmetic)
///
/// # Usage:
/// ```ignore
/// let mut balance = Balance::default();
/// balance.credit(1000)?;          // available = 1000
/// balance.reserve(500)?;          // available = 500, locked = 500
/// balance.settle_reserved(500)?;  // locked = 0, funds permanently gone
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    available: u64, // PRIVATE - spendable amount
    locked: u64,    // PRIVATE - reserved mid-transfer
}

impl Balance {
    /// Reconstruct from stored row values.
    ///
    /// Negative stored values mean the store itself is corrupt, which is
    /// an invariant violation rather than a client error.
    pub fn from_row(available: i64, locked: i64) -> Result<Self, WalletError> {
        if available < 0 || locked < 0 {
            return Err(WalletError::invariant(format!(
                "negative balance in store: available={available} locked={locked}"
            )));
        }
        Ok(Self {
            available: available as u64,
            locked: locked as u64,
        })
    }

    /// Get available balance (read-only)
    #[inline(always)]
    pub const fn available(&self) -> u64 {
        self.available
    }

    /// Get locked balance (read-only)
    #[inline(always)]
    pub const fn locked(&self) -> u64 {
        self.locked
    }

    /// True holdings (available + locked).
    /// Returns None on overflow (indicates data corruption)
    #[inline(always)]
    pub const fn total(&self) -> Option<u64> {
        self.available.checked_add(self.locked)
    }

    /// Add funds to the available balance.
    pub fn credit(&mut self, amount: u64) -> Result<(), WalletError> {
        self.available = self
            .available
            .checked_add(amount)
            .ok_or_else(|| WalletError::invariant("credit overflow"))?;
        Ok(())
    }

    /// Move funds from available to locked (reservation).
    ///
    /// The insufficient-funds check happens here, under the caller's row
    /// lock, so the check and the mutation are one step.
    pub fn reserve(&mut self, amount: u64) -> Result<(), WalletError> {
        if self.available < amount {
            return Err(WalletError::InsufficientFunds);
        }
        self.available = self
            .available
            .checked_sub(amount)
            .ok_or_else(|| WalletError::invariant("reserve available underflow"))?;
        self.locked = self
            .locked
            .checked_add(amount)
            .ok_or_else(|| WalletError::invariant("reserve locked overflow"))?;
        Ok(())
    }

    /// Move funds back from locked to available (abandoned reservation).
    ///
    /// A shortfall here means a call site reserved less than it releases,
    /// which is a Transfer Engine bug, not a retryable condition.
    pub fn release_reserved(&mut self, amount: u64) -> Result<(), WalletError> {
        if self.locked < amount {
            return Err(WalletError::invariant(format!(
                "release of {amount} exceeds locked {}",
                self.locked
            )));
        }
        self.locked = self
            .locked
            .checked_sub(amount)
            .ok_or_else(|| WalletError::invariant("release locked underflow"))?;
        self.available = self
            .available
            .checked_add(amount)
            .ok_or_else(|| WalletError::invariant("release available overflow"))?;
        Ok(())
    }

    /// Permanently remove reserved funds (completes a debit).
    pub fn settle_reserved(&mut self, amount: u64) -> Result<(), WalletError> {
        if self.locked < amount {
            return Err(WalletError::invariant(format!(
                "settle of {amount} exceeds locked {}",
                self.locked
            )));
        }
        self.locked = self
            .locked
            .checked_sub(amount)
            .ok_or_else(|| WalletError::invariant("settle locked underflow"))?;
        Ok(())
    }
}

// ============================================================
// TESTS - Prove enforcement works
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit() {
        let mut bal = Balance::default();
        assert_eq!(bal.available(), 0);

        bal.credit(100).unwrap();
        assert_eq!(bal.available(), 100);

        bal.credit(50).unwrap();
        assert_eq!(bal.available(), 150);
    }

    #[test]
    fn test_credit_overflow() {
        let mut bal = Balance::default();
        bal.credit(u64::MAX).unwrap();

        // Should fail
        assert!(bal.credit(1).is_err());
    }

    #[test]
    fn test_reserve_insufficient() {
        let mut bal = Balance::default();
        bal.credit(50).unwrap();

        let err = bal.reserve(100).unwrap_err();
        assert!(matches!(err, WalletError::InsufficientFunds));
        assert_eq!(bal.available(), 50); // Unchanged
        assert_eq!(bal.locked(), 0);
    }

    #[test]
    fn test_reserve_release_roundtrip() {
        let mut bal = Balance::default();
        bal.credit(100).unwrap();

        bal.reserve(60).unwrap();
        assert_eq!(bal.available(), 40);
        assert_eq!(bal.locked(), 60);
        assert_eq!(bal.total(), Some(100)); // Total unchanged

        bal.release_reserved(60).unwrap();
        assert_eq!(bal.available(), 100);
        assert_eq!(bal.locked(), 0);
    }

    #[test]
    fn test_settle_reserved_removes_funds() {
        let mut bal = Balance::default();
        bal.credit(100).unwrap();
        bal.reserve(60).unwrap();

        bal.settle_reserved(60).unwrap();
        assert_eq!(bal.locked(), 0);
        assert_eq!(bal.available(), 40); // Unchanged
        assert_eq!(bal.total(), Some(40)); // Total decreased
    }

    #[test]
    fn test_release_exceeding_locked_is_invariant_violation() {
        let mut bal = Balance::default();
        bal.credit(100).unwrap();
        bal.reserve(30).unwrap();

        let err = bal.release_reserved(60).unwrap_err();
        assert!(matches!(err, WalletError::InvariantViolation(_)));
    }

    #[test]
    fn test_from_row_rejects_negative_store_values() {
        assert!(Balance::from_row(-1, 0).is_err());
        assert!(Balance::from_row(0, -5).is_err());

        let bal = Balance::from_row(500, 200).unwrap();
        assert_eq!(bal.available(), 500);
        assert_eq!(bal.locked(), 200);
    }
}
