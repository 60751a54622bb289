//! Driving port for asset mutations.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{AssetDraft, AssetId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCommand: Send + Sync {
    /// Validate and store a new asset.
    async fn create_asset(&self, draft: AssetDraft) -> Result<AssetId, Error>;

    /// Apply the allow-listed subset of `fields` to an existing asset.
    ///
    /// Unknown keys are ignored. Nothing is written when no key survives.
    async fn update_asset(&self, id: &AssetId, fields: &Map<String, Value>) -> Result<(), Error>;
}
