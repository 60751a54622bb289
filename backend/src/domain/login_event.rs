//! Login audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// One recorded login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginEvent {
    #[schema(example = 1)]
    pub id: i64,
    /// Account the email resolved to; `None` when it matched nothing.
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub succeeded: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Insert payload for a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoginEvent {
    pub user_id: Option<UserId>,
    pub email: String,
    pub succeeded: bool,
}

/// Number of log entries to return, clamped to `1..=MAX`.
///
/// # Examples
/// ```
/// use inventory::domain::LogLimit;
///
/// assert_eq!(LogLimit::new(None).get(), LogLimit::DEFAULT);
/// assert_eq!(LogLimit::new(Some(0)).get(), 1);
/// assert_eq!(LogLimit::new(Some(10_000)).get(), LogLimit::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimit(u32);

impl LogLimit {
    pub const DEFAULT: u32 = 100;
    pub const MAX: u32 = 500;

    pub fn new(requested: Option<u32>) -> Self {
        Self(requested.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for LogLimit {
    fn default() -> Self {
        Self::new(None)
    }
}
