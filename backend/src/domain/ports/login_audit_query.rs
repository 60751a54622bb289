//! Driving port for reading the login log.

use async_trait::async_trait;

use crate::domain::{Error, LogLimit, LoginEvent};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginAuditQuery: Send + Sync {
    /// Most recent login attempts, newest first.
    async fn list_login_events(&self, limit: LogLimit) -> Result<Vec<LoginEvent>, Error>;
}
