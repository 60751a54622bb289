//! Asset API handlers.
//!
//! ```text
//! GET /api/assets
//! POST /api/assets {"item_name":"Chair","quantity":5,"inventory_number":"INV-1"}
//! PUT /api/assets/3 {"quantity":4,"remarks":"one broken"}
//! GET /api/assets/by-name?item_name=Chair
//! GET /api/assets/lists
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Asset, AssetDraft, AssetId, AssetTotal, Error, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_access;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::SuccessResponse;
use crate::inbound::http::validation::parse_asset_id;

/// Response of a successful creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedAssetResponse {
    pub success: bool,
    #[schema(value_type = i64, example = 3)]
    pub id: AssetId,
}

/// Query string for `GET /api/assets/by-name`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ByNameQuery {
    /// Exact item name to match.
    pub item_name: Option<String>,
}

/// List every asset record.
#[utoipa::path(
    get,
    path = "/api/assets",
    responses(
        (status = 200, description = "Assets", body = [Asset]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assets"],
    operation_id = "listAssets"
)]
#[get("/assets")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Asset>>> {
    require_access(&session, state.users.as_ref(), Operation::ReadAssets).await?;
    let assets = state.assets_query.list_assets().await?;
    Ok(web::Json(assets))
}

/// Record a new asset.
#[utoipa::path(
    post,
    path = "/api/assets",
    request_body = AssetDraft,
    responses(
        (status = 200, description = "Asset created", body = CreatedAssetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assets"],
    operation_id = "createAsset"
)]
#[post("/assets")]
pub async fn create_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssetDraft>,
) -> ApiResult<web::Json<CreatedAssetResponse>> {
    let actor = require_access(&session, state.users.as_ref(), Operation::CreateAsset).await?;
    let id = state.assets.create_asset(payload.into_inner()).await?;
    info!(actor = %actor.id(), asset_id = %id, "asset created");
    Ok(web::Json(CreatedAssetResponse { success: true, id }))
}

/// Partially update an asset.
///
/// Only allow-listed fields are applied; unknown keys are ignored. A body
/// with no allow-listed field is rejected without touching storage.
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    params(("id" = i64, Path, description = "Asset id")),
    request_body(content = Object, description = "Subset of asset fields to replace"),
    responses(
        (status = 200, description = "Asset updated", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Asset not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assets"],
    operation_id = "updateAsset"
)]
#[put("/assets/{id}")]
pub async fn update_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let actor = require_access(&session, state.users.as_ref(), Operation::UpdateAsset).await?;
    let id = parse_asset_id(&path.into_inner())?;
    state.assets.update_asset(&id, &payload).await?;
    info!(actor = %actor.id(), asset_id = %id, "asset updated");
    Ok(web::Json(SuccessResponse::ok()))
}

/// Records whose item name matches exactly.
#[utoipa::path(
    get,
    path = "/api/assets/by-name",
    params(ByNameQuery),
    responses(
        (status = 200, description = "Matching assets", body = [Asset]),
        (status = 400, description = "Missing item_name parameter", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assets"],
    operation_id = "listAssetsByName"
)]
#[get("/assets/by-name")]
pub async fn list_assets_by_name(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ByNameQuery>,
) -> ApiResult<web::Json<Vec<Asset>>> {
    require_access(&session, state.users.as_ref(), Operation::ReadAssets).await?;
    let name = query
        .into_inner()
        .item_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            Error::invalid_request("Missing item_name parameter")
                .with_details(json!({ "field": "item_name", "code": "missing_field" }))
        })?;
    let assets = state.assets_query.list_assets_by_name(&name).await?;
    Ok(web::Json(assets))
}

/// Total quantity per item name.
#[utoipa::path(
    get,
    path = "/api/assets/lists",
    responses(
        (status = 200, description = "Totals by item name", body = [AssetTotal]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assets"],
    operation_id = "listAssetTotals"
)]
#[get("/assets/lists")]
pub async fn list_asset_totals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AssetTotal>>> {
    require_access(&session, state.users.as_ref(), Operation::ReadAssets).await?;
    let totals = state.assets_query.list_asset_totals().await?;
    Ok(web::Json(totals))
}

#[cfg(test)]
mod tests;
