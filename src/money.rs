//! Money Conversion Module
//!
//! Unified conversion between the internal integer minor-unit (paise)
//! representation and client-facing strings. All conversions MUST go
//! through this module.
//!
//! ## Internal Representation
//! - All amounts are stored as integer paise (`u64` in memory, `i64` in
//!   PostgreSQL); 100 paise = 1 rupee
//! - Floating point never touches an amount

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::error::WalletError;

/// The ledger currency carries two fractional digits.
pub const MINOR_UNIT_DECIMALS: u32 = 2;

/// Money conversion errors
#[derive(Debug, Error)]
pub enum MoneyError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("too many decimal places: max {MINOR_UNIT_DECIMALS}")]
    PrecisionOverflow,

    #[error("amount too large, would overflow")]
    Overflow,

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<MoneyError> for WalletError {
    fn from(e: MoneyError) -> Self {
        WalletError::Validation(e.to_string())
    }
}

/// Convert a client amount string to integer paise.
///
/// Accepts "150", "150.5", "150.50". Rejects empty strings, signs,
/// ambiguous formats (".5", "5."), more than two fractional digits,
/// and zero.
///
/// # Example
/// ```ignore
/// assert_eq!(parse_amount("150.50")?, 15050);
/// ```
pub fn parse_amount(amount_str: &str) -> Result<u64, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }
    if amount_str.starts_with('-') || amount_str.starts_with('+') {
        return Err(MoneyError::InvalidAmount);
    }
    if amount_str.starts_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing leading zero (e.g., use 0.5 instead of .5)".into(),
        ));
    }
    if amount_str.ends_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
        ));
    }

    let decimal = Decimal::from_str(amount_str)
        .map_err(|e| MoneyError::InvalidFormat(e.to_string()))?;

    if decimal.scale() > MINOR_UNIT_DECIMALS {
        return Err(MoneyError::PrecisionOverflow);
    }

    let scaled = decimal
        .checked_mul(Decimal::from(10u64.pow(MINOR_UNIT_DECIMALS)))
        .ok_or(MoneyError::Overflow)?;

    let paise = scaled.to_u64().ok_or(MoneyError::Overflow)?;
    if paise == 0 {
        return Err(MoneyError::InvalidAmount);
    }
    Ok(paise)
}

/// Format integer paise as a human-readable string ("15050" -> "150.50").
pub fn format_amount(paise: u64) -> String {
    let whole = paise / 100;
    let frac = paise % 100;
    format!("{whole}.{frac:02}")
}

/// Validate an already-integer paise amount from an API payload.
pub fn validate_paise(amount: i64) -> Result<u64, MoneyError> {
    if amount <= 0 {
        return Err(MoneyError::InvalidAmount);
    }
    Ok(amount as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_rupees() {
        assert_eq!(parse_amount("150").unwrap(), 15000);
        assert_eq!(parse_amount("1").unwrap(), 100);
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(parse_amount("150.5").unwrap(), 15050);
        assert_eq!(parse_amount("150.50").unwrap(), 15050);
        assert_eq!(parse_amount("0.01").unwrap(), 1);
    }

    #[test]
    fn test_parse_rejects_too_many_decimals() {
        assert!(matches!(
            parse_amount("1.001"),
            Err(MoneyError::PrecisionOverflow)
        ));
    }

    #[test]
    fn test_parse_rejects_ambiguous_formats() {
        assert!(parse_amount(".5").is_err());
        assert!(parse_amount("5.").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_parse_rejects_signs_and_zero() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("+5").is_err());
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("0.00").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(15050), "150.50");
        assert_eq!(format_amount(100), "1.00");
        assert_eq!(format_amount(1), "0.01");
        assert_eq!(format_amount(0), "0.00");
    }

    #[test]
    fn test_validate_paise() {
        assert_eq!(validate_paise(5000).unwrap(), 5000);
        assert!(validate_paise(0).is_err());
        assert!(validate_paise(-100).is_err());
    }
}
