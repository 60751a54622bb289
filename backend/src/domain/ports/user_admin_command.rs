//! Driving port for account administration.

use async_trait::async_trait;

use crate::domain::{Error, NewPassword, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    /// Replace an account's password. Fails with not found for unknown ids.
    async fn reset_password(&self, id: &UserId, password: &NewPassword) -> Result<(), Error>;

    /// Remove an account. Fails with not found for unknown ids.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
