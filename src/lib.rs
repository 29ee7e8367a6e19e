//! user_ledger - User records and atomic balance transfers on PostgreSQL
//!
//! # Modules
//!
//! - [`core_types`] - Core type aliases (UserId, Amount)
//! - [`money`] - Exact two-decimal money parsing and formatting
//! - [`error`] - Error taxonomy shared by store and engine
//! - [`db`] - Connection pool handle
//! - [`account`] - Record store: insert, get, list users
//! - [`transfer`] - Transfer engine: locked, all-or-nothing balance moves
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`cli`] - Process arguments and the interactive shell

// Core types - must be first!
pub mod core_types;

pub mod account;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod money;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{User, UserRepository, ValidationError};
pub use core_types::{Amount, UserId};
pub use db::Database;
pub use error::{LedgerError, Role, TxStage};
pub use transfer::{LockOrder, TransferEngine, TransferReceipt};
