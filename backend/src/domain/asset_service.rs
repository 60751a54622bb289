//! Asset mutation and query services.
//!
//! Updates are unconditional and last-write-wins: there is no revision
//! token, and concurrent patches to the same record each apply in full.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::domain::ports::{AssetCommand, AssetPersistenceError, AssetQuery, AssetRepository};
use crate::domain::{
    Asset, AssetDraft, AssetId, AssetPatch, AssetTotal, AssetValidationError, Error, NewAsset,
};

/// Asset service implementing the asset driving ports.
#[derive(Clone)]
pub struct AssetService<A> {
    assets: Arc<A>,
}

impl<A> AssetService<A> {
    /// Create a new service over the given repository.
    pub fn new(assets: Arc<A>) -> Self {
        Self { assets }
    }
}

fn map_persistence_error(context: &'static str, error: AssetPersistenceError) -> Error {
    Error::storage(context, error.to_string())
}

/// Translate an asset validation failure into a client error.
fn validation_error(error: &AssetValidationError) -> Error {
    let message = match error {
        AssetValidationError::MissingField { .. } => "Missing required fields".to_owned(),
        AssetValidationError::NoValidFields => "No valid fields to update".to_owned(),
        AssetValidationError::InvalidId => "Invalid asset id".to_owned(),
        AssetValidationError::InvalidField { .. } => error.to_string(),
    };
    let details = match error.field() {
        Some(field) => json!({ "code": error.code(), "field": field }),
        None => json!({ "code": error.code() }),
    };
    Error::invalid_request(message).with_details(details)
}

#[async_trait]
impl<A> AssetCommand for AssetService<A>
where
    A: AssetRepository,
{
    async fn create_asset(&self, draft: AssetDraft) -> Result<AssetId, Error> {
        let asset = NewAsset::try_from_draft(draft).map_err(|err| validation_error(&err))?;
        let id = self
            .assets
            .insert(&asset)
            .await
            .map_err(|err| map_persistence_error("Failed to add asset", err))?;
        info!(asset_id = %id, item_name = %asset.item_name, "asset created");
        Ok(id)
    }

    async fn update_asset(&self, id: &AssetId, fields: &Map<String, Value>) -> Result<(), Error> {
        let patch = AssetPatch::from_fields(fields).map_err(|err| validation_error(&err))?;
        debug!(
            asset_id = %id,
            fields = ?patch.fields().map(|field| field.key()).collect::<Vec<_>>(),
            "applying asset patch"
        );
        let updated = self
            .assets
            .update(id, &patch)
            .await
            .map_err(|err| map_persistence_error("Failed to update asset", err))?;
        if !updated {
            return Err(Error::not_found("Asset not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl<A> AssetQuery for AssetService<A>
where
    A: AssetRepository,
{
    async fn list_assets(&self) -> Result<Vec<Asset>, Error> {
        self.assets
            .list_all()
            .await
            .map_err(|err| map_persistence_error("Database error", err))
    }

    async fn list_assets_by_name(&self, item_name: &str) -> Result<Vec<Asset>, Error> {
        self.assets
            .list_by_name(item_name)
            .await
            .map_err(|err| map_persistence_error("Database error", err))
    }

    async fn list_asset_totals(&self) -> Result<Vec<AssetTotal>, Error> {
        self.assets
            .totals_by_name()
            .await
            .map_err(|err| map_persistence_error("Database error", err))
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour against a mocked repository.
    use super::*;
    use crate::domain::ports::MockAssetRepository;
    use crate::domain::{AssetChange, DepartmentOrigin, ErrorCode};
    use rstest::rstest;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected JSON object, got {other}"),
        }
    }

    fn asset_id(raw: i64) -> AssetId {
        AssetId::new(raw).expect("fixture id")
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "id": 3, "created_by": "mallory" }))]
    #[tokio::test]
    async fn update_without_allowed_fields_never_touches_storage(#[case] body: Value) {
        let mut repo = MockAssetRepository::new();
        repo.expect_update().never();

        let err = AssetService::new(Arc::new(repo))
            .update_asset(&asset_id(1), &object(body))
            .await
            .expect_err("no valid fields");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "No valid fields to update");
        assert_eq!(err.details(), Some(&json!({ "code": "no_valid_fields" })));
    }

    #[rstest]
    #[case(json!({ "quantity": 2 }))]
    #[case(json!({ "remarks": "gone", "unknown": true }))]
    #[tokio::test]
    async fn update_of_missing_asset_is_not_found(#[case] body: Value) {
        let mut repo = MockAssetRepository::new();
        repo.expect_update().times(1).return_once(|_, _| Ok(false));

        let err = AssetService::new(Arc::new(repo))
            .update_asset(&asset_id(404), &object(body))
            .await
            .expect_err("missing asset");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Asset not found");
    }

    #[rstest]
    #[tokio::test]
    async fn update_passes_only_allowed_changes() {
        let mut repo = MockAssetRepository::new();
        repo.expect_update()
            .withf(|id, patch| {
                let changes = patch.changes();
                id.as_i64() == 8
                    && changes.len() == 2
                    && changes.contains(&AssetChange::DepartmentOrigin(DepartmentOrigin::Other))
                    && changes.contains(&AssetChange::Quantity(4))
            })
            .times(1)
            .return_once(|_, _| Ok(true));

        AssetService::new(Arc::new(repo))
            .update_asset(
                &asset_id(8),
                &object(json!({ "quantity": 4, "department_origin": "other", "id": 1 })),
            )
            .await
            .expect("update applies");
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_missing_fields_before_storage() {
        let mut repo = MockAssetRepository::new();
        repo.expect_insert().never();

        let err = AssetService::new(Arc::new(repo))
            .create_asset(AssetDraft {
                item_name: Some("Chair".into()),
                ..AssetDraft::default()
            })
            .await
            .expect_err("missing fields");
        assert_eq!(err.message(), "Missing required fields");
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!("missing_field"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_defaults_origin_to_own() {
        let mut repo = MockAssetRepository::new();
        repo.expect_insert()
            .withf(|asset| asset.department_origin == DepartmentOrigin::Own && asset.quantity == 5)
            .return_once(|_| Ok(AssetId::new(11).expect("id")));

        let id = AssetService::new(Arc::new(repo))
            .create_asset(AssetDraft {
                item_name: Some("Chair".into()),
                quantity: Some(5),
                inventory_number: Some("INV-1".into()),
                ..AssetDraft::default()
            })
            .await
            .expect("created");
        assert_eq!(id.as_i64(), 11);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_failure_is_internal_with_diagnostic() {
        let mut repo = MockAssetRepository::new();
        repo.expect_totals_by_name()
            .return_once(|| Err(AssetPersistenceError::query("database query error")));

        let err = AssetService::new(Arc::new(repo))
            .list_asset_totals()
            .await
            .expect_err("storage failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Database error");
        assert!(err.details().is_some());
    }
}
