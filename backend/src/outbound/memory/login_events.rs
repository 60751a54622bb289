//! In-memory login audit log.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{LoginEventPersistenceError, LoginEventRepository};
use crate::domain::{LogLimit, LoginEvent, NewLoginEvent};

/// Append-only `LoginEventRepository` over a vector.
pub struct InMemoryLoginEventRepository {
    events: RwLock<Vec<LoginEvent>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryLoginEventRepository {
    fn default() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

impl InMemoryLoginEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginEventRepository for InMemoryLoginEventRepository {
    async fn record(&self, event: &NewLoginEvent) -> Result<(), LoginEventPersistenceError> {
        let mut events = self.events.write().await;
        let id = i64::try_from(events.len())
            .map_err(|err| LoginEventPersistenceError::query(err.to_string()))?
            + 1;
        events.push(LoginEvent {
            id,
            user_id: event.user_id,
            email: event.email.clone(),
            succeeded: event.succeeded,
            occurred_at: self.clock.utc(),
        });
        Ok(())
    }

    async fn recent(&self, limit: LogLimit) -> Result<Vec<LoginEvent>, LoginEventPersistenceError> {
        let events = self.events.read().await;
        let take = usize::try_from(limit.get())
            .map_err(|err| LoginEventPersistenceError::query(err.to_string()))?;
        Ok(events.iter().rev().take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn recent_returns_newest_first_within_limit() {
        let repo = InMemoryLoginEventRepository::new();
        for email in ["a@x", "b@x", "c@x"] {
            repo.record(&NewLoginEvent {
                user_id: None,
                email: email.into(),
                succeeded: false,
            })
            .await
            .expect("record");
        }

        let events = repo.recent(LogLimit::new(Some(2))).await.expect("recent");
        let emails: Vec<_> = events.iter().map(|event| event.email.as_str()).collect();
        assert_eq!(emails, ["c@x", "b@x"]);
    }
}
