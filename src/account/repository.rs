//! Repository layer for user records

use sqlx::PgPool;

use super::models::{NewUser, User};
use super::validation::{validate_email, validate_initial_balance, validate_name};
use crate::core_types::{Amount, UserId};
use crate::error::{LedgerError, Role};

/// User repository: insert, fetch and list.
///
/// Every call is a single statement on the shared pool; nothing is retried.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate raw input into a [`NewUser`]
    pub fn prepare(name: &str, email: &str, balance: Amount) -> Result<NewUser, LedgerError> {
        Ok(NewUser {
            name: validate_name(name)?,
            email: validate_email(email)?,
            balance: validate_initial_balance(balance)?,
        })
    }

    /// Create a new user and return the stored row
    ///
    /// # Errors
    /// * `Validation` - negative or sub-cent balance, empty or malformed fields
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        balance: Amount,
    ) -> Result<User, LedgerError> {
        let new_user = Self::prepare(name, email, balance)?;

        let user: User = sqlx::query_as(
            r#"INSERT INTO users (name, email, balance) VALUES ($1, $2, $3)
               RETURNING id, name, email, balance, created_at"#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::query("insert user", 0, e))?;

        tracing::info!(user_id = user.id, balance = %user.balance, "User created");
        Ok(user)
    }

    /// Get user by ID
    ///
    /// # Errors
    /// * `NotFound` - no row with this id
    pub async fn get_by_id(&self, id: UserId) -> Result<User, LedgerError> {
        let user: Option<User> = sqlx::query_as(
            r#"SELECT id, name, email, balance, created_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::query("select user", id, e))?;

        user.ok_or(LedgerError::NotFound {
            id,
            role: Role::User,
        })
    }

    /// List all users ordered by id; empty when there are none
    pub async fn list_all(&self) -> Result<Vec<User>, LedgerError> {
        let users: Vec<User> = sqlx::query_as(
            r#"SELECT id, name, email, balance, created_at
               FROM users ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::query("list users", 0, e))?;

        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }
}
