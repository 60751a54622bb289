//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod assets;
pub mod auth;
pub mod error;
pub mod health;
pub mod logs;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;

/// Register every API handler and the extractor error handlers.
///
/// Mount inside a scope wrapped by the session middleware:
///
/// ```
/// use actix_web::{App, web};
/// use inventory::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::login)
        .service(users::logout)
        .service(users::current_session)
        .service(users::register)
        .service(users::list_users)
        .service(users::reset_password)
        .service(users::delete_user)
        .service(logs::list_login_events)
        .service(assets::list_assets)
        .service(assets::create_asset)
        .service(assets::list_assets_by_name)
        .service(assets::list_asset_totals)
        .service(assets::update_asset);
}
