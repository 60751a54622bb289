//! PostgreSQL-backed login audit log.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LoginEventPersistenceError, LoginEventRepository};
use crate::domain::{LogLimit, LoginEvent, NewLoginEvent};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{LoginEventRow, NewLoginEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::login_events;

/// Diesel-backed implementation of the `LoginEventRepository` port.
#[derive(Clone)]
pub struct DieselLoginEventRepository {
    pool: DbPool,
}

impl DieselLoginEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> LoginEventPersistenceError {
    map_pool_error(error, LoginEventPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> LoginEventPersistenceError {
    map_diesel_error(
        error,
        LoginEventPersistenceError::query,
        LoginEventPersistenceError::connection,
    )
}

#[async_trait]
impl LoginEventRepository for DieselLoginEventRepository {
    async fn record(&self, event: &NewLoginEvent) -> Result<(), LoginEventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(login_events::table)
            .values(NewLoginEventRow::from(event))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn recent(&self, limit: LogLimit) -> Result<Vec<LoginEvent>, LoginEventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = login_events::table
            .order((login_events::occurred_at.desc(), login_events::id.desc()))
            .limit(i64::from(limit.get()))
            .select(LoginEventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| {
                LoginEvent::try_from(row)
                    .map_err(|err| map_row_error(err, LoginEventPersistenceError::query))
            })
            .collect()
    }
}
