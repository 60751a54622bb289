//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use inventory::domain::{AssetService, CredentialService};
use inventory::inbound::http::state::HttpState;
use inventory::outbound::crypto::Argon2Hasher;
use inventory::outbound::memory::{
    InMemoryAssetRepository, InMemoryLoginEventRepository, InMemoryUserRepository,
};
use inventory::outbound::persistence::{
    DbPool, DieselAssetRepository, DieselLoginEventRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state.
///
/// PostgreSQL repositories are used when the configuration carries a pool;
/// otherwise everything lives in process memory and is lost on exit.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured hash cost is rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Arc::new(
        Argon2Hasher::new(config.hash_cost)
            .map_err(|err| std::io::Error::other(format!("invalid hash cost: {err}")))?,
    );

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_state(pool, hasher)
        }
        None => {
            warn!("no database configured; data is kept in memory only");
            memory_state(hasher)
        }
    };
    Ok(web::Data::new(state))
}

fn diesel_state(pool: &DbPool, hasher: Arc<Argon2Hasher>) -> HttpState {
    let credentials = CredentialService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselLoginEventRepository::new(pool.clone())),
        hasher,
    );
    let assets = AssetService::new(Arc::new(DieselAssetRepository::new(pool.clone())));
    HttpState::from_services(credentials, assets)
}

fn memory_state(hasher: Arc<Argon2Hasher>) -> HttpState {
    let credentials = CredentialService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryLoginEventRepository::new()),
        hasher,
    );
    let assets = AssetService::new(Arc::new(InMemoryAssetRepository::new()));
    HttpState::from_services(credentials, assets)
}
