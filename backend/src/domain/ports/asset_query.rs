//! Driving port for asset reads.

use async_trait::async_trait;

use crate::domain::{Asset, AssetTotal, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetQuery: Send + Sync {
    async fn list_assets(&self) -> Result<Vec<Asset>, Error>;

    /// Records whose item name matches exactly.
    async fn list_assets_by_name(&self, item_name: &str) -> Result<Vec<Asset>, Error>;

    /// Summed quantity per item name.
    async fn list_asset_totals(&self) -> Result<Vec<AssetTotal>, Error>;
}
