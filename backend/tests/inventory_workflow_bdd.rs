//! Behaviour tests for the session-authenticated inventory workflow.
//!
//! Scenarios drive the real handlers and domain services over the in-memory
//! adapters. Each request builds the app afresh around the same shared state
//! and session key, so cookies and stored data carry across steps.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::rt::SystemRunner;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use inventory::Trace;
use inventory::domain::{AssetService, CredentialService, Registration, Role, UserId};
use inventory::inbound::http::configure;
use inventory::inbound::http::state::HttpState;
use inventory::outbound::crypto::{Argon2Hasher, HashCost};
use inventory::outbound::memory::{
    InMemoryAssetRepository, InMemoryLoginEventRepository, InMemoryUserRepository,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const SESSION_COOKIE: &str = "session";

struct InventoryWorld {
    system: SystemRunner,
    state: RefCell<web::Data<HttpState>>,
    key: Key,
    accounts: RefCell<HashMap<String, UserId>>,
    cookies: RefCell<HashMap<String, Cookie<'static>>>,
    assets: RefCell<HashMap<String, i64>>,
    last_status: RefCell<Option<u16>>,
    last_body: RefCell<Value>,
}

fn memory_state() -> web::Data<HttpState> {
    let hasher = Argon2Hasher::new(HashCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("minimal argon2 cost is valid");
    let credentials = CredentialService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryLoginEventRepository::new()),
        Arc::new(hasher),
    );
    let assets = AssetService::new(Arc::new(InMemoryAssetRepository::new()));
    web::Data::new(HttpState::from_services(credentials, assets))
}

impl InventoryWorld {
    fn new() -> Self {
        Self {
            system: actix_web::rt::System::new(),
            state: RefCell::new(memory_state()),
            key: Key::generate(),
            accounts: RefCell::new(HashMap::new()),
            cookies: RefCell::new(HashMap::new()),
            assets: RefCell::new(HashMap::new()),
            last_status: RefCell::new(None),
            last_body: RefCell::new(Value::Null),
        }
    }

    fn seed(&self, email: &str, password: &str, role: Role) {
        let registration = Registration::try_from_parts(email, email, password, Some(role))
            .expect("valid registration");
        let state = self.state.borrow().clone();
        let id = self
            .system
            .block_on(async move { state.registration.register(&registration, Some(Role::Head)).await })
            .expect("seed account");
        self.accounts.borrow_mut().insert(email.to_owned(), id);
    }

    /// Send `request` as `actor`, attaching and refreshing their cookie.
    fn send(&self, actor: &str, request: TestRequest) {
        let request = match self.cookies.borrow().get(actor) {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let state = self.state.borrow().clone();
        let key = self.key.clone();

        let (status, body, cookie) = self.system.block_on(async move {
            let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
                .cookie_name(SESSION_COOKIE.to_owned())
                .cookie_secure(false)
                .build();
            let app = test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .service(web::scope("/api").wrap(session).configure(configure)),
            )
            .await;
            let res = test::call_service(&app, request.to_request()).await;
            let status = res.status().as_u16();
            let cookie = res
                .response()
                .cookies()
                .find(|c| c.name() == SESSION_COOKIE)
                .map(Cookie::into_owned);
            let bytes = test::read_body(res).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, body, cookie)
        });

        if let Some(cookie) = cookie {
            self.cookies.borrow_mut().insert(actor.to_owned(), cookie);
        }
        *self.last_status.borrow_mut() = Some(status);
        *self.last_body.borrow_mut() = body;
    }
}

#[fixture]
fn world() -> InventoryWorld {
    InventoryWorld::new()
}

#[given("an empty inventory service")]
fn an_empty_inventory_service(world: &InventoryWorld) {
    *world.state.borrow_mut() = memory_state();
    world.accounts.borrow_mut().clear();
    world.cookies.borrow_mut().clear();
}

#[given("an employee account {email} with password {password}")]
fn an_employee_account(world: &InventoryWorld, email: String, password: String) {
    world.seed(&email, &password, Role::Employee);
}

#[given("a head account {email} with password {password}")]
fn a_head_account(world: &InventoryWorld, email: String, password: String) {
    world.seed(&email, &password, Role::Head);
}

#[when("{email} signs in with password {password}")]
fn signs_in(world: &InventoryWorld, email: String, password: String) {
    let request = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }));
    world.send(&email, request);
}

#[when("{email} records {quantity} of {item} as {number}")]
fn records_asset(world: &InventoryWorld, email: String, quantity: i32, item: String, number: String) {
    let request = TestRequest::post().uri("/api/assets").set_json(json!({
        "item_name": item,
        "quantity": quantity,
        "inventory_number": number,
    }));
    world.send(&email, request);
    assert_eq!(*world.last_status.borrow(), Some(200), "asset creation failed");
    let id = world.last_body.borrow()["id"]
        .as_i64()
        .expect("created asset id");
    world.assets.borrow_mut().insert(number, id);
}

#[when("{email} sets the quantity of {number} to {quantity}")]
fn sets_quantity(world: &InventoryWorld, email: String, number: String, quantity: i32) {
    let id = *world.assets.borrow().get(&number).expect("known asset");
    let request = TestRequest::put()
        .uri(&format!("/api/assets/{id}"))
        .set_json(json!({ "quantity": quantity }));
    world.send(&email, request);
}

#[when("{email} requests {path}")]
fn requests_path(world: &InventoryWorld, email: String, path: String) {
    world.send(&email, TestRequest::get().uri(&path));
}

#[when("{email} deletes the account of {target}")]
fn deletes_account(world: &InventoryWorld, email: String, target: String) {
    let id = *world.accounts.borrow().get(&target).expect("known account");
    world.send(
        &email,
        TestRequest::delete().uri(&format!("/api/users/{}", id.as_i64())),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &InventoryWorld, status: u16) {
    assert_eq!(
        *world.last_status.borrow(),
        Some(status),
        "body: {}",
        world.last_body.borrow()
    );
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &InventoryWorld, code: String) {
    let body = world.last_body.borrow();
    assert_eq!(body["code"].as_str(), Some(code.as_str()));
    assert!(body["traceId"].is_string(), "error bodies carry a trace id");
}

#[then("{email} sees a total of {total} for {item}")]
fn sees_total(world: &InventoryWorld, email: String, total: i64, item: String) {
    world.send(&email, TestRequest::get().uri("/api/assets/lists"));
    assert_eq!(*world.last_status.borrow(), Some(200));
    let body = world.last_body.borrow();
    let row = body
        .as_array()
        .expect("totals array")
        .iter()
        .find(|row| row["item_name"] == item.as_str())
        .expect("item listed");
    assert_eq!(row["total_quantity"].as_i64(), Some(total));
}

#[then("the login log lists {count} events with the newest successful")]
fn login_log_lists(world: &InventoryWorld, count: usize) {
    let body = world.last_body.borrow();
    let events = body.as_array().expect("events array");
    assert_eq!(events.len(), count);
    assert_eq!(events[0]["succeeded"], true);
    assert!(events.iter().skip(1).all(|event| event["succeeded"] == false));
}

#[scenario(
    path = "tests/features/inventory_workflow.feature",
    name = "An employee records and adjusts an asset"
)]
fn an_employee_records_and_adjusts_an_asset(world: InventoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inventory_workflow.feature",
    name = "Employees cannot read the login log"
)]
fn employees_cannot_read_the_login_log(world: InventoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inventory_workflow.feature",
    name = "A head of department sees failed and successful logins"
)]
fn a_head_of_department_sees_failed_and_successful_logins(world: InventoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inventory_workflow.feature",
    name = "Deleting an account ends its session"
)]
fn deleting_an_account_ends_its_session(world: InventoryWorld) {
    drop(world);
}
