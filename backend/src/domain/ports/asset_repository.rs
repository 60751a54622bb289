//! Port abstraction for asset persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Asset, AssetId, AssetPatch, AssetTotal, NewAsset};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by asset repository adapters.
    pub enum AssetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "asset repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "asset repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Insert a record and return its identifier.
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetPersistenceError>;

    /// Apply `patch` in a single statement and stamp `last_updated`.
    ///
    /// Returns `false` when no record has this id.
    async fn update(&self, id: &AssetId, patch: &AssetPatch)
    -> Result<bool, AssetPersistenceError>;

    /// Every record, in id order.
    async fn list_all(&self) -> Result<Vec<Asset>, AssetPersistenceError>;

    /// Records whose item name equals `item_name` exactly.
    async fn list_by_name(&self, item_name: &str) -> Result<Vec<Asset>, AssetPersistenceError>;

    /// Summed quantity per distinct item name. Order is unspecified.
    async fn totals_by_name(&self) -> Result<Vec<AssetTotal>, AssetPersistenceError>;
}
