//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, Role, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account.
    ///
    /// `requested_by` is the role of the authenticated caller, if any; it
    /// decides whether a head account may be created.
    async fn register(
        &self,
        registration: &Registration,
        requested_by: Option<Role>,
    ) -> Result<UserId, Error>;
}
