//! Balance Transfers
//!
//! Atomic, lock-protected movement of money between two users.
//!
//! # Safety Invariants
//!
//! 1. **Lock-Before-Read**: balances are read with `FOR UPDATE`, never plain `SELECT`
//! 2. **Check-Before-Write**: the sender's funds are checked before any `UPDATE`
//! 3. **All-or-Nothing**: every error path rolls back; only `COMMIT` publishes
//! 4. **No Retry**: a failed transfer is reported, never re-attempted with stale state
//!
//! Concurrent transfers touching the same row serialize on its lock. With
//! [`LockOrder::Role`] two opposite-direction transfers can deadlock and one
//! fails with `Deadlock`; [`LockOrder::Id`] rules that out.

pub mod engine;
pub mod types;

pub use engine::TransferEngine;
pub use types::{LockOrder, TransferReceipt};
