//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssetCommand, AssetQuery, CredentialHasher, LoginAuditQuery, LoginEventRepository,
    LoginService, RegistrationService, UserAdminCommand, UserRepository, UsersQuery,
};
use crate::domain::{AssetService, CredentialService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub user_admin: Arc<dyn UserAdminCommand>,
    pub login_audit: Arc<dyn LoginAuditQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub user_admin: Arc<dyn UserAdminCommand>,
    pub login_audit: Arc<dyn LoginAuditQuery>,
    pub assets: Arc<dyn AssetCommand>,
    pub assets_query: Arc<dyn AssetQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            user_admin,
            login_audit,
            assets,
            assets_query,
        } = ports;
        Self {
            login,
            registration,
            users,
            user_admin,
            login_audit,
            assets,
            assets_query,
        }
    }

    /// Wire every port to the two domain services.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use inventory::domain::{AssetService, CredentialService};
    /// use inventory::inbound::http::state::HttpState;
    /// use inventory::outbound::crypto::{Argon2Hasher, HashCost};
    /// use inventory::outbound::memory::{
    ///     InMemoryAssetRepository, InMemoryLoginEventRepository, InMemoryUserRepository,
    /// };
    ///
    /// let hasher = Argon2Hasher::new(HashCost::default()).expect("default cost is valid");
    /// let credentials = CredentialService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemoryLoginEventRepository::new()),
    ///     Arc::new(hasher),
    /// );
    /// let assets = AssetService::new(Arc::new(InMemoryAssetRepository::new()));
    /// let state = HttpState::from_services(credentials, assets);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_services<U, L, H, A>(
        credentials: CredentialService<U, L, H>,
        assets: AssetService<A>,
    ) -> Self
    where
        U: UserRepository + 'static,
        L: LoginEventRepository + 'static,
        H: CredentialHasher + 'static,
        A: crate::domain::ports::AssetRepository + 'static,
    {
        let credentials = Arc::new(credentials);
        let assets = Arc::new(assets);
        Self::new(HttpStatePorts {
            login: credentials.clone(),
            registration: credentials.clone(),
            users: credentials.clone(),
            user_admin: credentials.clone(),
            login_audit: credentials,
            assets: assets.clone(),
            assets_query: assets,
        })
    }
}
