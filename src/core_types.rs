//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.

/// User ID - assigned by the store on insert, immutable afterwards.
///
/// # Usage:
/// - Primary key of the `users` relation (`BIGSERIAL`)
/// - Row-lock key for transfers
pub type UserId = i64;

/// Money amount - exact decimal with two fractional digits.
///
/// Never a binary float; see [`crate::money`].
pub type Amount = rust_decimal::Decimal;
