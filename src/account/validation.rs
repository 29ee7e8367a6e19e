//! Input validation for user records and transfer requests
//!
//! Validation runs before any statement is sent to the database, so a
//! rejected request never opens a transaction.

use rust_decimal::Decimal;

use crate::core_types::UserId;
use crate::money::{self, MoneyError};

/// Maximum length of `name` and `email`
pub const MAX_FIELD_LEN: usize = 255;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for user records and transfer requests
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid length for {field}: expected {min}-{max}, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Invalid format for {field}: '{value}' (expected: {expected})")]
    InvalidFormat {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid {field}: {source}")]
    Money {
        field: &'static str,
        #[source]
        source: MoneyError,
    },

    #[error("Balance must not be negative: got {0:.2}")]
    NegativeBalance(Decimal),

    #[error("Amount must be greater than zero: got {0:.2}")]
    NonPositiveAmount(Decimal),

    #[error("Source and target user cannot be the same: {0}")]
    SameUser(UserId),
}

fn check_length(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 || len > MAX_FIELD_LEN {
        return Err(ValidationError::InvalidLength {
            field,
            min: 1,
            max: MAX_FIELD_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Validate a display name
///
/// # Validation Rules
/// - Length: 1-255 characters after trimming
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    check_length("name", name)?;
    Ok(name.to_string())
}

/// Validate a contact address
///
/// # Validation Rules
/// - Length: 1-255 characters after trimming
/// - Exactly one `@` with non-empty local and domain parts
/// - No whitespace
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    check_length("email", email)?;

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };
    if !well_formed || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            value: email.to_string(),
            expected: "local@domain",
        });
    }
    Ok(email.to_string())
}

/// Validate an opening balance: non-negative, at most two fractional digits
pub fn validate_initial_balance(balance: Decimal) -> Result<Decimal, ValidationError> {
    let balance = money::to_money(balance).map_err(|source| ValidationError::Money {
        field: "balance",
        source,
    })?;
    if balance.is_sign_negative() && !balance.is_zero() {
        return Err(ValidationError::NegativeBalance(balance));
    }
    Ok(balance)
}

/// Validate a transfer request before a transaction is opened
///
/// Rejects non-positive amounts, sub-cent precision and self-transfers.
pub fn validate_transfer(
    from_id: UserId,
    to_id: UserId,
    amount: Decimal,
) -> Result<Decimal, ValidationError> {
    if from_id == to_id {
        return Err(ValidationError::SameUser(from_id));
    }
    let amount = money::to_money(amount).map_err(|source| ValidationError::Money {
        field: "amount",
        source,
    })?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}
