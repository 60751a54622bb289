//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{NewUserRecord, PasswordHash, StoredCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with this email already exists.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Credential store. Email uniqueness is enforced by the adapter atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user and its password hash by email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new account and return its identifier.
    async fn insert(&self, record: &NewUserRecord) -> Result<UserId, UserPersistenceError>;

    /// Delete an account. Returns `false` when no row matched.
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Replace the stored hash. Returns `false` when no row matched.
    async fn set_password_hash(
        &self,
        id: &UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError>;

    /// Every account, oldest first, without hashes.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}
