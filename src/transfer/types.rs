//! Transfer Types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core_types::{Amount, UserId};
use crate::error::Role;
use crate::money::format_money;

/// Order in which the two user rows are locked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockOrder {
    /// Sender first, then receiver. Opposite-direction transfers between the
    /// same pair can deadlock; Postgres aborts one of them.
    #[default]
    Role,
    /// Lowest id first. No lock cycle is possible between two transfers.
    Id,
}

impl LockOrder {
    /// The `(id, role)` pairs in locking order
    pub fn sequence(self, from_id: UserId, to_id: UserId) -> [(UserId, Role); 2] {
        let sender = (from_id, Role::Sender);
        let receiver = (to_id, Role::Receiver);
        match self {
            LockOrder::Id if to_id < from_id => [receiver, sender],
            _ => [sender, receiver],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LockOrder::Role => "role",
            LockOrder::Id => "id",
        }
    }
}

impl fmt::Display for LockOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "role" => Ok(LockOrder::Role),
            "id" => Ok(LockOrder::Id),
            other => Err(format!("unknown lock order '{}' (expected: role, id)", other)),
        }
    }
}

/// Outcome of a committed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from_id: UserId,
    pub to_id: UserId,
    pub amount: Amount,
    /// Sender balance after the debit
    pub sender_balance: Amount,
    /// Receiver balance after the credit
    pub receiver_balance: Amount,
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} {} (sender {}, receiver {})",
            self.from_id,
            self.to_id,
            format_money(self.amount),
            format_money(self.sender_balance),
            format_money(self.receiver_balance)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_role_order_ignores_ids() {
        assert_eq!(
            LockOrder::Role.sequence(9, 2),
            [(9, Role::Sender), (2, Role::Receiver)]
        );
    }

    #[test]
    fn test_id_order_locks_lowest_first() {
        assert_eq!(
            LockOrder::Id.sequence(9, 2),
            [(2, Role::Receiver), (9, Role::Sender)]
        );
        assert_eq!(
            LockOrder::Id.sequence(2, 9),
            [(2, Role::Sender), (9, Role::Receiver)]
        );
    }

    #[test]
    fn test_lock_order_from_str() {
        assert_eq!("ROLE".parse::<LockOrder>().unwrap(), LockOrder::Role);
        assert_eq!("id".parse::<LockOrder>().unwrap(), LockOrder::Id);
        assert!("random".parse::<LockOrder>().is_err());
    }

    #[test]
    fn test_receipt_display() {
        let receipt = TransferReceipt {
            from_id: 1,
            to_id: 2,
            amount: Decimal::new(3000, 2),
            sender_balance: Decimal::new(7000, 2),
            receiver_balance: Decimal::new(8000, 2),
        };
        assert_eq!(
            receipt.to_string(),
            "1 → 2 30.00 (sender 70.00, receiver 80.00)"
        );
    }
}
