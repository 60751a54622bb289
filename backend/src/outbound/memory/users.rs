//! In-memory credential store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, PasswordHash, StoredCredentials, User, UserId};

#[derive(Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<UserId, StoredCredentials>,
}

/// `UserRepository` over a process-local map.
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `clock` to stamp `created_at`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(UserTable::default()),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|stored| stored.user().email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).map(|stored| stored.user().clone()))
    }

    async fn insert(&self, record: &NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut table = self.table.write().await;
        let email_key = record.email.to_lowercase();
        if table
            .rows
            .values()
            .any(|stored| stored.user().email().to_lowercase() == email_key)
        {
            return Err(UserPersistenceError::duplicate_email(record.email.as_str()));
        }

        let next = table.last_id + 1;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let user = User::new(
            id,
            record.name.as_str(),
            record.email.as_str(),
            record.role,
            self.clock.utc(),
        );
        table.last_id = next;
        table.rows.insert(
            id,
            StoredCredentials::new(user, record.password_hash.clone()),
        );
        Ok(id)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(id).is_some())
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut table = self.table.write().await;
        let Some(stored) = table.rows.get_mut(id) else {
            return Ok(false);
        };
        *stored = StoredCredentials::new(stored.user().clone(), hash.clone());
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .map(|stored| stored.user().clone())
            .collect())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let table = self.table.read().await;
        u64::try_from(table.rows.len()).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}
