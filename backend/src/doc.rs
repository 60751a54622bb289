//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint of the inbound layer together with
//! the domain and transfer types they exchange, plus the session cookie
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Asset, AssetDraft, AssetTotal, DepartmentOrigin, Error, ErrorCode, LoginEvent, Role, User,
};
use crate::inbound::http::assets::CreatedAssetResponse;
use crate::inbound::http::users::{
    LoginRequest, RegisterRequest, RegisteredResponse, ResetPasswordRequest, SuccessResponse,
    UserEnvelope,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Asset inventory API",
        description = "Staff accounts, role-checked asset records and the login audit log."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::reset_password,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::logs::list_login_events,
        crate::inbound::http::assets::list_assets,
        crate::inbound::http::assets::create_asset,
        crate::inbound::http::assets::update_asset,
        crate::inbound::http::assets::list_assets_by_name,
        crate::inbound::http::assets::list_asset_totals,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Role,
        Asset,
        AssetDraft,
        AssetTotal,
        DepartmentOrigin,
        LoginEvent,
        Error,
        ErrorCode,
        LoginRequest,
        RegisterRequest,
        RegisteredResponse,
        ResetPasswordRequest,
        SuccessResponse,
        UserEnvelope,
        CreatedAssetResponse,
    )),
    tags(
        (name = "users", description = "Sessions, accounts and the login log"),
        (name = "assets", description = "Asset records and totals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
