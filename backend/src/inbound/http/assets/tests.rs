//! Tests for asset API handlers.

use super::*;
use crate::domain::Role;
use crate::inbound::http::test_utils::{
    login_request, memory_state, seed_account, session_cookie, test_app,
};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

const EMAIL: &str = "staff@example.com";
const PASSWORD: &str = "secret1";

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

/// Start an app with one employee account and return its session cookie.
macro_rules! signed_in_app {
    () => {{
        let state = memory_state();
        seed_account(&state, EMAIL, PASSWORD, Role::Employee).await;
        let app = actix_test::init_service(test_app(state)).await;
        let response =
            actix_test::call_service(&app, login_request(EMAIL, PASSWORD).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        (app, cookie)
    }};
}

fn create_request(cookie: &Cookie<'static>, body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/assets")
        .cookie(cookie.clone())
        .set_json(body)
}

fn get_request(cookie: &Cookie<'static>, uri: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(uri).cookie(cookie.clone())
}

fn update_request(cookie: &Cookie<'static>, id: &str, body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::put()
        .uri(&format!("/api/assets/{id}"))
        .cookie(cookie.clone())
        .set_json(body)
}

#[rstest]
#[case("/api/assets")]
#[case("/api/assets/lists")]
#[case("/api/assets/by-name?item_name=Chair")]
#[actix_web::test]
async fn reads_require_a_session(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "unauthorized");
}

#[actix_web::test]
async fn created_asset_is_found_by_name_with_defaults() {
    let (app, cookie) = signed_in_app!();

    let created = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "Chair", "quantity": 5, "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created = body_json(created).await;
    assert_eq!(created["success"], true);

    let found = actix_test::call_service(
        &app,
        get_request(&cookie, "/api/assets/by-name?item_name=Chair").to_request(),
    )
    .await;
    assert_eq!(found.status(), StatusCode::OK);
    let found = body_json(found).await;
    let records = found.as_array().expect("array of assets");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], created["id"]);
    assert_eq!(records[0]["quantity"], 5);
    assert_eq!(records[0]["department_origin"], "own");
    assert_eq!(records[0]["room_number"], "");
    assert!(records[0]["year_of_purchase"].is_null());
}

#[rstest]
#[case(json!({"quantity": 5, "inventory_number": "INV-1"}), "item_name")]
#[case(json!({"item_name": "Chair", "inventory_number": "INV-1"}), "quantity")]
#[case(json!({"item_name": "Chair", "quantity": 0, "inventory_number": "INV-1"}), "quantity")]
#[case(json!({"item_name": "Chair", "quantity": 2, "inventory_number": "  "}), "inventory_number")]
#[actix_web::test]
async fn create_rejects_missing_fields(#[case] body: Value, #[case] field: &str) {
    let (app, cookie) = signed_in_app!();

    let response = actix_test::call_service(&app, create_request(&cookie, body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["error"], "Missing required fields");
    assert_eq!(value["details"]["code"], "missing_field");
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn create_rejects_wrongly_typed_json() {
    let (app, cookie) = signed_in_app!();

    let response = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "Chair", "quantity": "five", "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"]["code"], "invalid_json");
}

#[actix_web::test]
async fn by_name_requires_item_name() {
    let (app, cookie) = signed_in_app!();

    let response =
        actix_test::call_service(&app, get_request(&cookie, "/api/assets/by-name").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Missing item_name parameter"
    );
}

#[actix_web::test]
async fn totals_sum_quantities_per_item() {
    let (app, cookie) = signed_in_app!();
    for (name, quantity, number) in [("Chair", 3, "INV-1"), ("Chair", 2, "INV-2"), ("Desk", 1, "INV-3")]
    {
        let response = actix_test::call_service(
            &app,
            create_request(
                &cookie,
                json!({"item_name": name, "quantity": quantity, "inventory_number": number}),
            )
            .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response =
        actix_test::call_service(&app, get_request(&cookie, "/api/assets/lists").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let mut totals: Vec<(String, i64)> = value
        .as_array()
        .expect("array of totals")
        .iter()
        .map(|row| {
            (
                row["item_name"].as_str().unwrap_or_default().to_owned(),
                row["total_quantity"].as_i64().unwrap_or_default(),
            )
        })
        .collect();
    totals.sort();
    assert_eq!(
        totals,
        vec![("Chair".to_owned(), 5), ("Desk".to_owned(), 1)]
    );
}

#[actix_web::test]
async fn update_applies_allowed_fields_and_ignores_unknown_ones() {
    let (app, cookie) = signed_in_app!();
    let created = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "Chair", "quantity": 5, "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;
    let id = body_json(created).await["id"].to_string();

    let patch = json!({"quantity": 4, "remarks": "one broken", "colour": "red"});
    for _ in 0..2 {
        let response = actix_test::call_service(
            &app,
            update_request(&cookie, &id, patch.clone()).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
    }

    let listed =
        actix_test::call_service(&app, get_request(&cookie, "/api/assets").to_request()).await;
    let listed = body_json(listed).await;
    let record = &listed.as_array().expect("array of assets")[0];
    assert_eq!(record["quantity"], 4);
    assert_eq!(record["remarks"], "one broken");
    assert_eq!(record["item_name"], "Chair");
    assert!(record.get("colour").is_none());
}

#[rstest]
#[case(json!({}))]
#[case(json!({"colour": "red", "id": 9}))]
#[actix_web::test]
async fn update_without_allowed_fields_is_rejected(#[case] body: Value) {
    let (app, cookie) = signed_in_app!();

    let response =
        actix_test::call_service(&app, update_request(&cookie, "1", body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["error"], "No valid fields to update");
    assert_eq!(value["details"]["code"], "no_valid_fields");
}

#[rstest]
#[case("abc", StatusCode::BAD_REQUEST, "Invalid asset id")]
#[case("-1", StatusCode::BAD_REQUEST, "Invalid asset id")]
#[case("404", StatusCode::NOT_FOUND, "Asset not found")]
#[actix_web::test]
async fn update_rejects_bad_targets(
    #[case] id: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let (app, cookie) = signed_in_app!();

    let response = actix_test::call_service(
        &app,
        update_request(&cookie, id, json!({"quantity": 1})).to_request(),
    )
    .await;

    assert_eq!(response.status(), status);
    assert_eq!(body_json(response).await["error"], message);
}

#[actix_web::test]
async fn update_rejects_wrongly_typed_values() {
    let (app, cookie) = signed_in_app!();
    let created = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "Chair", "quantity": 5, "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;
    let id = body_json(created).await["id"].to_string();

    let response = actix_test::call_service(
        &app,
        update_request(&cookie, &id, json!({"quantity": "lots"})).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_field");
    assert_eq!(value["details"]["field"], "quantity");
}

#[actix_web::test]
async fn oversized_text_is_a_client_error_on_create_and_update() {
    let (app, cookie) = signed_in_app!();

    let response = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "x".repeat(300), "quantity": 1, "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_field");
    assert_eq!(value["details"]["field"], "item_name");

    let listed = actix_test::call_service(&app, get_request(&cookie, "/api/assets").to_request()).await;
    assert_eq!(body_json(listed).await, json!([]));

    let created = actix_test::call_service(
        &app,
        create_request(
            &cookie,
            json!({"item_name": "Chair", "quantity": 5, "inventory_number": "INV-1"}),
        )
        .to_request(),
    )
    .await;
    let id = body_json(created).await["id"].to_string();

    let response = actix_test::call_service(
        &app,
        update_request(&cookie, &id, json!({"room_number": "9".repeat(100)})).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_field");
    assert_eq!(value["details"]["field"], "room_number");
}
