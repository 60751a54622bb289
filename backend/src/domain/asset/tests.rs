//! Coverage for asset validation and the partial update allow-list.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

#[fixture]
fn chair() -> Asset {
    Asset {
        id: AssetId::new(1).expect("id"),
        year_of_purchase: Some(2020),
        item_name: "Chair".into(),
        quantity: 5,
        inventory_number: "INV-1".into(),
        room_number: "101".into(),
        floor_number: "1".into(),
        building_block: "A".into(),
        remarks: String::new(),
        department_origin: DepartmentOrigin::Own,
        last_updated: Utc::now(),
    }
}

#[rstest]
#[case(AssetDraft { quantity: Some(1), inventory_number: Some("I".into()), ..AssetDraft::default() }, "item_name")]
#[case(AssetDraft { item_name: Some("  ".into()), quantity: Some(1), inventory_number: Some("I".into()), ..AssetDraft::default() }, "item_name")]
#[case(AssetDraft { item_name: Some("Desk".into()), quantity: Some(1), ..AssetDraft::default() }, "inventory_number")]
#[case(AssetDraft { item_name: Some("Desk".into()), inventory_number: Some("I".into()), ..AssetDraft::default() }, "quantity")]
#[case(AssetDraft { item_name: Some("Desk".into()), quantity: Some(0), inventory_number: Some("I".into()), ..AssetDraft::default() }, "quantity")]
#[case(AssetDraft { item_name: Some("Desk".into()), quantity: Some(-2), inventory_number: Some("I".into()), ..AssetDraft::default() }, "quantity")]
fn draft_rejects_missing_required_fields(#[case] draft: AssetDraft, #[case] field: &str) {
    let err = NewAsset::try_from_draft(draft).expect_err("draft must be rejected");
    assert_eq!(err.code(), "missing_field");
    assert_eq!(err.field(), Some(field));
}

fn long_text(chars: usize) -> String {
    "x".repeat(chars)
}

#[rstest]
#[case(AssetField::ItemName, NAME_MAX_CHARS + 1)]
#[case(AssetField::InventoryNumber, NAME_MAX_CHARS + 1)]
#[case(AssetField::RoomNumber, SHORT_TEXT_MAX_CHARS + 1)]
#[case(AssetField::FloorNumber, SHORT_TEXT_MAX_CHARS + 1)]
#[case(AssetField::BuildingBlock, SHORT_TEXT_MAX_CHARS + 1)]
fn draft_rejects_text_wider_than_its_column(#[case] field: AssetField, #[case] chars: usize) {
    let mut draft = AssetDraft {
        item_name: Some("Desk".into()),
        quantity: Some(1),
        inventory_number: Some("INV-1".into()),
        ..AssetDraft::default()
    };
    let text = Some(long_text(chars));
    match field {
        AssetField::ItemName => draft.item_name = text,
        AssetField::InventoryNumber => draft.inventory_number = text,
        AssetField::RoomNumber => draft.room_number = text,
        AssetField::FloorNumber => draft.floor_number = text,
        _ => draft.building_block = text,
    }

    let err = NewAsset::try_from_draft(draft).expect_err("oversized text");
    assert_eq!(err.code(), "invalid_field");
    assert_eq!(err.field(), Some(field.key()));
}

#[rstest]
fn draft_accepts_text_at_column_width() {
    let draft = AssetDraft {
        item_name: Some(long_text(NAME_MAX_CHARS)),
        quantity: Some(1),
        inventory_number: Some("INV-1".into()),
        room_number: Some("é".repeat(SHORT_TEXT_MAX_CHARS)),
        remarks: Some(long_text(4_000)),
        ..AssetDraft::default()
    };
    let asset = NewAsset::try_from_draft(draft).expect("fits every column");
    assert_eq!(asset.item_name.len(), NAME_MAX_CHARS);
    assert_eq!(asset.room_number.chars().count(), SHORT_TEXT_MAX_CHARS);
}

#[rstest]
#[case(json!({ "item_name": long_text(NAME_MAX_CHARS + 1) }), "item_name")]
#[case(json!({ "inventory_number": long_text(NAME_MAX_CHARS + 1) }), "inventory_number")]
#[case(json!({ "room_number": long_text(SHORT_TEXT_MAX_CHARS + 1) }), "room_number")]
#[case(json!({ "building_block": long_text(SHORT_TEXT_MAX_CHARS + 1), "quantity": 2 }), "building_block")]
fn patch_rejects_text_wider_than_its_column(#[case] body: Value, #[case] field: &str) {
    let err = AssetPatch::from_fields(&object(body)).expect_err("oversized text");
    assert_eq!(err.code(), "invalid_field");
    assert_eq!(err.field(), Some(field));
}

#[rstest]
fn draft_keeps_supplied_optional_fields() {
    let draft = AssetDraft {
        item_name: Some(" Projector ".into()),
        quantity: Some(2),
        inventory_number: Some("INV-9".into()),
        year_of_purchase: Some(2019),
        remarks: Some("ceiling mount".into()),
        department_origin: Some(DepartmentOrigin::Other),
        ..AssetDraft::default()
    };
    let asset = NewAsset::try_from_draft(draft).expect("valid draft");
    assert_eq!(asset.item_name, "Projector");
    assert_eq!(asset.year_of_purchase, Some(2019));
    assert_eq!(asset.remarks, "ceiling mount");
    assert_eq!(asset.department_origin, DepartmentOrigin::Other);
}

#[rstest]
fn from_key_covers_every_allowed_field() {
    for field in AssetField::ALL {
        assert_eq!(AssetField::from_key(field.key()), Some(field));
    }
    assert_eq!(AssetField::from_key("id"), None);
    assert_eq!(AssetField::from_key("last_updated"), None);
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "id": 4 }))]
#[case(json!({ "last_updated": "2020-01-01", "password": "x" }))]
fn patch_without_allowed_keys_has_no_valid_fields(#[case] body: Value) {
    let err = AssetPatch::from_fields(&object(body)).expect_err("empty intersection");
    assert_eq!(err, AssetValidationError::NoValidFields);
}

#[rstest]
fn patch_drops_unknown_keys_silently() {
    let patch = AssetPatch::from_fields(&object(json!({
        "remarks": "scratched",
        "id": 99,
        "owner": "nobody",
    })))
    .expect("patch");
    assert_eq!(patch.changes(), &[AssetChange::Remarks("scratched".into())]);
}

#[rstest]
#[case(json!({ "quantity": "ten" }), "quantity")]
#[case(json!({ "quantity": 1.5 }), "quantity")]
#[case(json!({ "quantity": -1 }), "quantity")]
#[case(json!({ "quantity": null }), "quantity")]
#[case(json!({ "item_name": "" }), "item_name")]
#[case(json!({ "item_name": null }), "item_name")]
#[case(json!({ "inventory_number": 12 }), "inventory_number")]
#[case(json!({ "year_of_purchase": "2020" }), "year_of_purchase")]
#[case(json!({ "department_origin": "elsewhere" }), "department_origin")]
#[case(json!({ "room_number": 4 }), "room_number")]
fn patch_rejects_wrongly_typed_allowed_fields(#[case] body: Value, #[case] field: &str) {
    let err = AssetPatch::from_fields(&object(body)).expect_err("invalid value");
    assert_eq!(err.code(), "invalid_field");
    assert_eq!(err.field(), Some(field));
}

#[rstest]
fn patch_allows_zero_quantity() {
    let patch = AssetPatch::from_fields(&object(json!({ "quantity": 0 }))).expect("patch");
    assert_eq!(patch.changes(), &[AssetChange::Quantity(0)]);
}

#[rstest]
fn null_clears_year_and_empties_location(mut chair: Asset) {
    let patch = AssetPatch::from_fields(&object(json!({
        "year_of_purchase": null,
        "room_number": null,
    })))
    .expect("patch");
    chair.apply(&patch);
    assert_eq!(chair.year_of_purchase, None);
    assert_eq!(chair.room_number, "");
    assert_eq!(chair.building_block, "A");
}

#[rstest]
fn applying_patch_twice_is_idempotent(mut chair: Asset) {
    let patch = AssetPatch::from_fields(&object(json!({
        "quantity": 7,
        "department_origin": "other",
        "remarks": "moved",
    })))
    .expect("patch");
    chair.apply(&patch);
    let once = chair.clone();
    chair.apply(&patch);
    assert_eq!(chair, once);
    assert_eq!(chair.quantity, 7);
    assert_eq!(chair.department_origin, DepartmentOrigin::Other);
}

#[rstest]
#[case("12", true)]
#[case("0", false)]
#[case("-3", false)]
#[case("x", false)]
fn asset_id_parsing(#[case] raw: &str, #[case] ok: bool) {
    assert_eq!(raw.parse::<AssetId>().is_ok(), ok);
}

#[rstest]
fn asset_serialises_snake_case(chair: Asset) {
    let value = serde_json::to_value(&chair).expect("serialises");
    assert_eq!(value["item_name"], json!("Chair"));
    assert_eq!(value["department_origin"], json!("own"));
    assert_eq!(value["id"], json!(1));
}
