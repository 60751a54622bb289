//! PostgreSQL-backed `AssetRepository` implementation using Diesel ORM.
//!
//! Updates are a single `UPDATE ... WHERE id = $1`; the affected-row count
//! tells missing records apart from applied patches.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssetPersistenceError, AssetRepository};
use crate::domain::{Asset, AssetId, AssetPatch, AssetTotal, NewAsset};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{AssetChangeset, AssetRow, AssetTotalRow, NewAssetRow, total_from_row};
use super::pool::{DbPool, PoolError};
use super::schema::assets;

/// Diesel-backed implementation of the `AssetRepository` port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AssetPersistenceError {
    map_pool_error(error, AssetPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AssetPersistenceError {
    map_diesel_error(
        error,
        AssetPersistenceError::query,
        AssetPersistenceError::connection,
    )
}

fn to_assets(rows: Vec<AssetRow>) -> Result<Vec<Asset>, AssetPersistenceError> {
    rows.into_iter()
        .map(|row| {
            Asset::try_from(row).map_err(|err| map_row_error(err, AssetPersistenceError::query))
        })
        .collect()
}

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = diesel::insert_into(assets::table)
            .values(NewAssetRow::from(asset))
            .returning(assets::id)
            .get_result::<i64>(&mut conn)
            .await
            .map_err(diesel_error)?;

        AssetId::new(id).map_err(|_| AssetPersistenceError::query("database returned invalid id"))
    }

    async fn update(
        &self,
        id: &AssetId,
        patch: &AssetPatch,
    ) -> Result<bool, AssetPersistenceError> {
        let changeset = AssetChangeset::from_patch(patch, Utc::now());
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(assets::table.find(id.as_i64()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_all(&self) -> Result<Vec<Asset>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = assets::table
            .order(assets::id.asc())
            .select(AssetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_assets(rows)
    }

    async fn list_by_name(&self, item_name: &str) -> Result<Vec<Asset>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = assets::table
            .filter(assets::item_name.eq(item_name))
            .order(assets::id.asc())
            .select(AssetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_assets(rows)
    }

    async fn totals_by_name(&self) -> Result<Vec<AssetTotal>, AssetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = assets::table
            .group_by(assets::item_name)
            .select((assets::item_name, sum(assets::quantity)))
            .load::<AssetTotalRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(total_from_row).collect())
    }
}
