//! Ledger Error Types
//!
//! One taxonomy shared by the record store and the transfer engine.
//! Errors carry the ids, amounts and underlying driver error needed to
//! render a useful message; nothing here is ever retried.

use std::fmt;

use thiserror::Error;

use crate::account::validation::ValidationError;
use crate::core_types::{Amount, UserId};

/// SQLSTATE raised when `lock_timeout` expires
const SQLSTATE_LOCK_NOT_AVAILABLE: &str = "55P03";
/// SQLSTATE raised when Postgres picks this transaction as deadlock victim
const SQLSTATE_DEADLOCK_DETECTED: &str = "40P01";

/// Which side of an operation an id was looked up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Sender,
    Receiver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Sender => "sender",
            Role::Receiver => "receiver",
        })
    }
}

/// Transaction lifecycle step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TxStage::Begin => "begin",
            TxStage::Commit => "commit",
        })
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{role} {id} not found")]
    NotFound { id: UserId, role: Role },

    #[error("Insufficient funds for user {user_id}: have {balance:.2}, need {requested:.2}")]
    InsufficientFunds {
        user_id: UserId,
        balance: Amount,
        requested: Amount,
    },

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Transaction {stage} failed: {source}")]
    Transaction {
        stage: TxStage,
        #[source]
        source: sqlx::Error,
    },

    #[error("Timed out waiting for row lock on user {user_id}")]
    LockTimeout { user_id: UserId },

    #[error("Transaction aborted by deadlock detection")]
    Deadlock,

    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl LedgerError {
    /// Stable error code for display and scripting
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "VALIDATION_ERROR",
            LedgerError::NotFound { .. } => "NOT_FOUND",
            LedgerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            LedgerError::Connection(_) => "CONNECTION_ERROR",
            LedgerError::Transaction { .. } => "TRANSACTION_ERROR",
            LedgerError::LockTimeout { .. } => "LOCK_TIMEOUT",
            LedgerError::Deadlock => "DEADLOCK",
            LedgerError::Query { .. } => "QUERY_ERROR",
        }
    }

    /// Classify a failed statement.
    ///
    /// Lock and deadlock aborts are recognised by SQLSTATE, transport and
    /// pool failures become `Connection`, everything else keeps `context`.
    pub fn query(context: &'static str, user_id: UserId, source: sqlx::Error) -> Self {
        match sqlstate(&source).as_deref() {
            Some(SQLSTATE_LOCK_NOT_AVAILABLE) => return LedgerError::LockTimeout { user_id },
            Some(SQLSTATE_DEADLOCK_DETECTED) => return LedgerError::Deadlock,
            _ => {}
        }
        if is_connection_error(&source) {
            return LedgerError::Connection(source);
        }
        LedgerError::Query { context, source }
    }

    /// Classify a failed begin or commit.
    pub fn transaction(stage: TxStage, source: sqlx::Error) -> Self {
        if sqlstate(&source).as_deref() == Some(SQLSTATE_DEADLOCK_DETECTED) {
            return LedgerError::Deadlock;
        }
        LedgerError::Transaction { stage, source }
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

/// Transport, TLS and pool failures: the store is unreachable, not the query wrong
pub fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_)
    )
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        if is_connection_error(&e) {
            LedgerError::Connection(e)
        } else {
            LedgerError::Query {
                context: "database error",
                source: e,
            }
        }
    }
}
