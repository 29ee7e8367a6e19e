//! Data models for user records

use chrono::{DateTime, Utc};
use std::fmt;

use crate::core_types::{Amount, UserId};
use crate::money::format_money;

/// User record
///
/// `name` and `email` are immutable once inserted; `balance` changes only
/// through the transfer engine.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub balance: Amount,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub balance: Amount,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} <{}> — {}",
            self.id,
            self.name,
            self.email,
            format_money(self.balance)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_user_display() {
        let user = User {
            id: 3,
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            balance: Decimal::new(10050, 2),
            created_at: Utc::now(),
        };
        assert_eq!(user.to_string(), "3: alice <alice@example.com> — 100.50");
    }

    #[test]
    fn test_user_display_pads_whole_balances() {
        let user = User {
            id: 1,
            name: "bob".to_string(),
            email: "bob@example.com".to_string(),
            balance: Decimal::from(50),
            created_at: Utc::now(),
        };
        assert!(user.to_string().ends_with("— 50.00"));
    }
}
