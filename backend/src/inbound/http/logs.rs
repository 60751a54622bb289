//! Login log handler.
//!
//! ```text
//! GET /api/logs?limit=50
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, LogLimit, LoginEvent, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_access;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/logs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogsQuery {
    /// Entries to return; clamped to 1..=500, default 100.
    pub limit: Option<u32>,
}

/// Most recent login attempts, newest first.
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogsQuery),
    responses(
        (status = 200, description = "Login attempts", body = [LoginEvent]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listLoginEvents"
)]
#[get("/logs")]
pub async fn list_login_events(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LogsQuery>,
) -> ApiResult<web::Json<Vec<LoginEvent>>> {
    require_access(&session, state.users.as_ref(), Operation::ViewLogs).await?;
    let limit = LogLimit::new(query.limit);
    let events = state.login_audit.list_login_events(limit).await?;
    Ok(web::Json(events))
}
