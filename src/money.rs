//! Money Parsing and Formatting
//!
//! Balances are exact decimals with a fixed scale of two fractional digits
//! (cents). All conversions between client strings and `Decimal` go through
//! this module.
//!
//! ## Rules
//! 1. No binary floating point anywhere on the balance path
//! 2. No silent rounding: more than [`SCALE`] fractional digits is an error
//! 3. Display always renders exactly [`SCALE`] fractional digits
//!
//! ```rust
//! use user_ledger::money::{parse_money, format_money};
//!
//! let amount = parse_money("30.5").unwrap();
//! assert_eq!(format_money(amount), "30.50");
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits stored for every balance (`NUMERIC(20, 2)`)
pub const SCALE: u32 = 2;

/// Largest whole part that fits `NUMERIC(20, 2)`
const MAX_WHOLE_DIGITS: usize = 18;

/// Money conversion errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Amount too large")]
    Overflow,
}

/// Parse a client-supplied money string into a `Decimal` with scale [`SCALE`].
///
/// Accepts an optional leading `-` so that callers can report negative
/// balances as a validation failure rather than a format error.
///
/// # Errors
/// * `InvalidFormat` - empty input, stray characters, `.5` or `5.`
/// * `PrecisionOverflow` - more than two fractional digits
/// * `Overflow` - whole part does not fit the column
pub fn parse_money(input: &str) -> Result<Decimal, MoneyError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (whole, frac) = match unsigned.split_once('.') {
        None => (unsigned, ""),
        Some((w, f)) => {
            if w.is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                ));
            }
            if f.is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                ));
            }
            (w, f)
        }
    };

    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(MoneyError::InvalidFormat(format!("not a decimal number: {}", s)));
    }

    if frac.len() > SCALE as usize {
        return Err(MoneyError::PrecisionOverflow {
            provided: frac.len() as u32,
            max: SCALE,
        });
    }

    if whole.trim_start_matches('0').len() > MAX_WHOLE_DIGITS {
        return Err(MoneyError::Overflow);
    }

    let mut value = Decimal::from_str(s).map_err(|e| MoneyError::InvalidFormat(e.to_string()))?;
    value.rescale(SCALE);
    Ok(value)
}

/// Normalize a `Decimal` to [`SCALE`], rejecting anything that would lose
/// digits or not fit the column.
pub fn to_money(value: Decimal) -> Result<Decimal, MoneyError> {
    let normalized = value.normalize();
    if normalized.scale() > SCALE {
        return Err(MoneyError::PrecisionOverflow {
            provided: normalized.scale(),
            max: SCALE,
        });
    }
    if normalized.abs() >= whole_limit() {
        return Err(MoneyError::Overflow);
    }
    let mut value = normalized;
    value.rescale(SCALE);
    Ok(value)
}

/// 10^MAX_WHOLE_DIGITS, the smallest magnitude the column cannot hold
fn whole_limit() -> Decimal {
    Decimal::from(10_i64.pow(MAX_WHOLE_DIGITS as u32))
}

/// Render a balance with exactly two fractional digits.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value)
}
