//! Record store for user accounts
//!
//! PostgreSQL-backed create/read/list of users. Balances are only ever
//! changed by [`crate::transfer`].

pub mod models;
pub mod repository;
pub mod validation;

pub use models::{NewUser, User};
pub use repository::UserRepository;
pub use validation::ValidationError;
