//! Test helpers for inbound HTTP components.
//!
//! Handler tests run against the real domain services over the in-memory
//! adapters, with an Argon2 cost low enough to keep them fast.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test::TestRequest, web};
use serde_json::json;

use crate::Trace;
use crate::domain::{AssetService, CredentialService, Registration, Role, UserId};
use crate::outbound::crypto::{Argon2Hasher, HashCost};
use crate::outbound::memory::{
    InMemoryAssetRepository, InMemoryLoginEventRepository, InMemoryUserRepository,
};

use super::state::HttpState;

pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Argon2 parameters at the crate's lower bounds.
pub fn cheap_hasher() -> Argon2Hasher {
    Argon2Hasher::new(HashCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("minimal argon2 cost is valid")
}

/// Handler state over fresh in-memory stores.
pub fn memory_state() -> HttpState {
    let credentials = CredentialService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryLoginEventRepository::new()),
        Arc::new(cheap_hasher()),
    );
    let assets = AssetService::new(Arc::new(InMemoryAssetRepository::new()));
    HttpState::from_services(credentials, assets)
}

/// Create an account directly through the registration port.
pub async fn seed_account(state: &HttpState, email: &str, password: &str, role: Role) -> UserId {
    let registration = Registration::try_from_parts(email, email, password, Some(role))
        .expect("valid registration");
    state
        .registration
        .register(&registration, Some(Role::Head))
        .await
        .expect("seed account")
}

/// Full API application wired the way the server wires it.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(super::configure),
        )
}

/// `POST /api/login` request for the given credentials.
pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}
