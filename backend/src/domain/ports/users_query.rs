//! Driving port for account queries.
//!
//! Inbound adapters use this port to list accounts and to resolve the user
//! behind a session without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every account, without password hashes.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Resolve a single account; `None` when it no longer exists.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
