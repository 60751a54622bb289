//! In-memory asset repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{AssetPersistenceError, AssetRepository};
use crate::domain::{Asset, AssetId, AssetPatch, AssetTotal, NewAsset};

#[derive(Default)]
struct AssetTable {
    last_id: i64,
    rows: BTreeMap<AssetId, Asset>,
}

/// `AssetRepository` over a process-local map.
pub struct InMemoryAssetRepository {
    table: RwLock<AssetTable>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryAssetRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `clock` to stamp `last_updated`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(AssetTable::default()),
            clock,
        }
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetPersistenceError> {
        let mut table = self.table.write().await;
        let next = table.last_id + 1;
        let id = AssetId::new(next).map_err(|err| AssetPersistenceError::query(err.to_string()))?;
        let NewAsset {
            year_of_purchase,
            item_name,
            quantity,
            inventory_number,
            room_number,
            floor_number,
            building_block,
            remarks,
            department_origin,
        } = asset.clone();
        table.rows.insert(
            id,
            Asset {
                id,
                year_of_purchase,
                item_name,
                quantity,
                inventory_number,
                room_number,
                floor_number,
                building_block,
                remarks,
                department_origin,
                last_updated: self.clock.utc(),
            },
        );
        table.last_id = next;
        Ok(id)
    }

    async fn update(
        &self,
        id: &AssetId,
        patch: &AssetPatch,
    ) -> Result<bool, AssetPersistenceError> {
        let mut table = self.table.write().await;
        let Some(asset) = table.rows.get_mut(id) else {
            return Ok(false);
        };
        asset.apply(patch);
        asset.last_updated = self.clock.utc();
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Asset>, AssetPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_by_name(&self, item_name: &str) -> Result<Vec<Asset>, AssetPersistenceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|asset| asset.item_name == item_name)
            .cloned()
            .collect())
    }

    async fn totals_by_name(&self) -> Result<Vec<AssetTotal>, AssetPersistenceError> {
        let table = self.table.read().await;
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for asset in table.rows.values() {
            *totals.entry(asset.item_name.as_str()).or_default() += i64::from(asset.quantity);
        }
        Ok(totals
            .into_iter()
            .map(|(item_name, total_quantity)| AssetTotal {
                item_name: item_name.to_owned(),
                total_quantity,
            })
            .collect())
    }
}
