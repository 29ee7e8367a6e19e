//! REPL command parsing
//!
//! One input line becomes one [`Command`]. Parsing never touches the
//! database; a [`ParseError`] is printed and the loop continues.

use std::fmt;
use std::str::FromStr;

use crate::core_types::{Amount, UserId};
use crate::money::{MoneyError, parse_money};

pub const USAGE_ADD: &str = "add <name> <email> <balance>";
pub const USAGE_GET: &str = "get <id>";
pub const USAGE_TRANSFER: &str = "transfer <from> <to> <amount>";

pub const HELP: &str = "Commands:
  help                             Show this help
  list                             List all users
  add <name> <email> <balance>     Add new user
  get <id>                         Show user by id
  transfer <from> <to> <amount>    Transfer money
  exit, quit                       Exit CLI";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Add {
        name: String,
        email: String,
        balance: Amount,
    },
    Get {
        id: UserId,
    },
    Transfer {
        from_id: UserId,
        to_id: UserId,
        amount: Amount,
    },
    Exit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}' — type 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("invalid {field}: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: MoneyError,
    },
}

fn parse_id(token: &str) -> Result<UserId, ParseError> {
    token
        .parse::<UserId>()
        .map_err(|_| ParseError::InvalidId(token.to_string()))
}

fn parse_amount(field: &'static str, token: &str) -> Result<Amount, ParseError> {
    parse_money(token).map_err(|source| ParseError::InvalidAmount { field, source })
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((head, rest)) = parts.split_first() else {
            return Err(ParseError::Empty);
        };

        match head.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "list" => Ok(Command::List),
            "exit" | "quit" => Ok(Command::Exit),
            "add" => match rest {
                [name, email, balance] => Ok(Command::Add {
                    name: name.to_string(),
                    email: email.to_string(),
                    balance: parse_amount("balance", balance)?,
                }),
                _ => Err(ParseError::Usage(USAGE_ADD)),
            },
            "get" => match rest {
                [id] => Ok(Command::Get { id: parse_id(id)? }),
                _ => Err(ParseError::Usage(USAGE_GET)),
            },
            "transfer" => match rest {
                [from, to, amount] => Ok(Command::Transfer {
                    from_id: parse_id(from)?,
                    to_id: parse_id(to)?,
                    amount: parse_amount("amount", amount)?,
                }),
                _ => Err(ParseError::Usage(USAGE_TRANSFER)),
            },
            _ => Err(ParseError::Unknown(head.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Help => f.write_str("help"),
            Command::List => f.write_str("list"),
            Command::Add { name, email, balance } => {
                write!(f, "add {} {} {}", name, email, balance)
            }
            Command::Get { id } => write!(f, "get {}", id),
            Command::Transfer {
                from_id,
                to_id,
                amount,
            } => write!(f, "transfer {} {} {}", from_id, to_id, amount),
            Command::Exit => f.write_str("exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("help", Command::Help)]
    #[case("  LIST ", Command::List)]
    #[case("exit", Command::Exit)]
    #[case("Quit", Command::Exit)]
    #[case("get 12", Command::Get { id: 12 })]
    #[case(
        "add alice alice@example.com 100.00",
        Command::Add { name: "alice".into(), email: "alice@example.com".into(), balance: dec("100.00") }
    )]
    #[case(
        "transfer 1 2 30",
        Command::Transfer { from_id: 1, to_id: 2, amount: dec("30.00") }
    )]
    fn test_parse_valid(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(line.parse::<Command>().unwrap(), expected);
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("   ", ParseError::Empty)]
    #[case("delete 1", ParseError::Unknown("delete".into()))]
    #[case("add alice", ParseError::Usage(USAGE_ADD))]
    #[case("add a b 1 extra", ParseError::Usage(USAGE_ADD))]
    #[case("get", ParseError::Usage(USAGE_GET))]
    #[case("get one", ParseError::InvalidId("one".into()))]
    #[case("transfer 1 2", ParseError::Usage(USAGE_TRANSFER))]
    #[case("transfer x 2 5", ParseError::InvalidId("x".into()))]
    fn test_parse_invalid(#[case] line: &str, #[case] expected: ParseError) {
        assert_eq!(line.parse::<Command>().unwrap_err(), expected);
    }

    #[test]
    fn test_parse_invalid_amounts() {
        assert!(matches!(
            "add bob bob@example.com ten".parse::<Command>(),
            Err(ParseError::InvalidAmount {
                field: "balance",
                ..
            })
        ));
        assert!(matches!(
            "transfer 1 2 0.001".parse::<Command>(),
            Err(ParseError::InvalidAmount {
                field: "amount",
                source: MoneyError::PrecisionOverflow { .. }
            })
        ));
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        // Sign is a business rule, enforced by the engine, not the parser
        let cmd = "transfer 1 2 -5".parse::<Command>().unwrap();
        assert_eq!(
            cmd,
            Command::Transfer {
                from_id: 1,
                to_id: 2,
                amount: dec("-5.00")
            }
        );
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(
            ParseError::Usage(USAGE_GET).to_string(),
            "usage: get <id>"
        );
    }
}
