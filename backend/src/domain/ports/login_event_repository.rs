//! Port for the login audit log.
use async_trait::async_trait;

use crate::domain::{LogLimit, LoginEvent, NewLoginEvent};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by login event adapters.
    pub enum LoginEventPersistenceError {
        Connection { message: String } => "login event repository connection failed: {message}",
        Query { message: String } => "login event repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginEventRepository: Send + Sync {
    /// Append one login attempt.
    async fn record(&self, event: &NewLoginEvent) -> Result<(), LoginEventPersistenceError>;

    /// Most recent attempts, newest first.
    async fn recent(&self, limit: LogLimit) -> Result<Vec<LoginEvent>, LoginEventPersistenceError>;
}
