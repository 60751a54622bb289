//! Asset records and the allow-listed partial update model.
//!
//! An [`AssetPatch`] is built from an arbitrary JSON object: keys outside
//! [`AssetField`] are dropped, the remaining values are type-checked, and a
//! patch with nothing left is rejected before any storage is touched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Width of the item name and inventory number columns.
pub const NAME_MAX_CHARS: usize = 255;
/// Width of the room, floor and building block columns.
pub const SHORT_TEXT_MAX_CHARS: usize = 64;

/// Validation errors raised while building asset values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetValidationError {
    /// Identifier was zero, negative or not a number.
    InvalidId,
    /// A required field was absent, blank or non-positive.
    MissingField { field: &'static str },
    /// An allowed field carried a value of the wrong shape.
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    /// None of the supplied keys is an updatable field.
    NoValidFields,
}

impl AssetValidationError {
    /// Machine-readable code reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::MissingField { .. } => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::NoValidFields => "no_valid_fields",
        }
    }

    /// Field the error refers to, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(field),
            Self::InvalidId | Self::NoValidFields => None,
        }
    }
}

impl fmt::Display for AssetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "asset id must be a positive integer"),
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::InvalidField { field, reason } => write!(f, "{field} {reason}"),
            Self::NoValidFields => write!(f, "no valid fields to update"),
        }
    }
}

impl std::error::Error for AssetValidationError {}

/// Stable asset identifier assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AssetId(i64);

impl AssetId {
    pub fn new(id: i64) -> Result<Self, AssetValidationError> {
        if id <= 0 {
            return Err(AssetValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = AssetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.parse::<i64>().map_err(|_| AssetValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for AssetId {
    type Error = AssetValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetId> for i64 {
    fn from(value: AssetId) -> Self {
        value.0
    }
}

/// Whether the asset belongs to the recording department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentOrigin {
    #[default]
    Own,
    Other,
}

impl DepartmentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Other => "other",
        }
    }
}

impl FromStr for DepartmentOrigin {
    type Err = AssetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own" => Ok(Self::Own),
            "other" => Ok(Self::Other),
            _ => Err(AssetValidationError::InvalidField {
                field: AssetField::DepartmentOrigin.key(),
                reason: "must be \"own\" or \"other\"",
            }),
        }
    }
}

/// Stored asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    #[schema(value_type = i64, example = 1)]
    pub id: AssetId,
    #[schema(example = 2021)]
    pub year_of_purchase: Option<i32>,
    #[schema(example = "Chair")]
    pub item_name: String,
    #[schema(example = 5)]
    pub quantity: i32,
    #[schema(example = "INV-1")]
    pub inventory_number: String,
    pub room_number: String,
    pub floor_number: String,
    pub building_block: String,
    pub remarks: String,
    pub department_origin: DepartmentOrigin,
    pub last_updated: DateTime<Utc>,
}

impl Asset {
    /// Apply every change in `patch`. Unpatched fields keep their values.
    pub fn apply(&mut self, patch: &AssetPatch) {
        for change in patch.changes() {
            match change.clone() {
                AssetChange::YearOfPurchase(value) => self.year_of_purchase = value,
                AssetChange::ItemName(value) => self.item_name = value,
                AssetChange::Quantity(value) => self.quantity = value,
                AssetChange::InventoryNumber(value) => self.inventory_number = value,
                AssetChange::RoomNumber(value) => self.room_number = value,
                AssetChange::FloorNumber(value) => self.floor_number = value,
                AssetChange::BuildingBlock(value) => self.building_block = value,
                AssetChange::Remarks(value) => self.remarks = value,
                AssetChange::DepartmentOrigin(value) => self.department_origin = value,
            }
        }
    }
}

/// Unvalidated creation input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AssetDraft {
    pub year_of_purchase: Option<i32>,
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub inventory_number: Option<String>,
    pub room_number: Option<String>,
    pub floor_number: Option<String>,
    pub building_block: Option<String>,
    pub remarks: Option<String>,
    pub department_origin: Option<DepartmentOrigin>,
}

/// Validated creation input.
///
/// ## Invariants
/// - `item_name` and `inventory_number` are trimmed and non-empty.
/// - `quantity` is strictly positive.
/// - Text fields fit their column widths (see [`AssetField::max_chars`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub year_of_purchase: Option<i32>,
    pub item_name: String,
    pub quantity: i32,
    pub inventory_number: String,
    pub room_number: String,
    pub floor_number: String,
    pub building_block: String,
    pub remarks: String,
    pub department_origin: DepartmentOrigin,
}

impl NewAsset {
    /// Validate a draft, filling defaults for optional fields.
    ///
    /// # Examples
    /// ```
    /// use inventory::domain::{AssetDraft, DepartmentOrigin, NewAsset};
    ///
    /// let draft = AssetDraft {
    ///     item_name: Some("Chair".into()),
    ///     quantity: Some(5),
    ///     inventory_number: Some("INV-1".into()),
    ///     ..AssetDraft::default()
    /// };
    /// let asset = NewAsset::try_from_draft(draft).unwrap();
    /// assert_eq!(asset.department_origin, DepartmentOrigin::Own);
    /// assert_eq!(asset.room_number, "");
    /// ```
    pub fn try_from_draft(draft: AssetDraft) -> Result<Self, AssetValidationError> {
        let item_name = required_text(draft.item_name, AssetField::ItemName)?;
        let inventory_number = required_text(draft.inventory_number, AssetField::InventoryNumber)?;
        let quantity = match draft.quantity {
            Some(quantity) if quantity > 0 => quantity,
            _ => {
                return Err(AssetValidationError::MissingField {
                    field: AssetField::Quantity.key(),
                });
            }
        };

        Ok(Self {
            year_of_purchase: draft.year_of_purchase,
            item_name,
            quantity,
            inventory_number,
            room_number: bounded(AssetField::RoomNumber, draft.room_number.unwrap_or_default())?,
            floor_number: bounded(
                AssetField::FloorNumber,
                draft.floor_number.unwrap_or_default(),
            )?,
            building_block: bounded(
                AssetField::BuildingBlock,
                draft.building_block.unwrap_or_default(),
            )?,
            remarks: draft.remarks.unwrap_or_default(),
            department_origin: draft.department_origin.unwrap_or_default(),
        })
    }
}

fn required_text(value: Option<String>, field: AssetField) -> Result<String, AssetValidationError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => bounded(field, text.to_owned()),
        _ => Err(AssetValidationError::MissingField { field: field.key() }),
    }
}

/// Reject text longer than the column backing `field`.
fn bounded(field: AssetField, text: String) -> Result<String, AssetValidationError> {
    match field.max_chars() {
        Some(max) if text.chars().count() > max => Err(invalid(field, too_long_reason(max))),
        _ => Ok(text),
    }
}

fn too_long_reason(max: usize) -> &'static str {
    match max {
        SHORT_TEXT_MAX_CHARS => "must be at most 64 characters",
        _ => "must be at most 255 characters",
    }
}

/// Fields a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetField {
    YearOfPurchase,
    ItemName,
    Quantity,
    InventoryNumber,
    RoomNumber,
    FloorNumber,
    BuildingBlock,
    Remarks,
    DepartmentOrigin,
}

impl AssetField {
    /// The complete allow-list.
    pub const ALL: [AssetField; 9] = [
        Self::YearOfPurchase,
        Self::ItemName,
        Self::Quantity,
        Self::InventoryNumber,
        Self::RoomNumber,
        Self::FloorNumber,
        Self::BuildingBlock,
        Self::Remarks,
        Self::DepartmentOrigin,
    ];

    /// JSON key naming this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::YearOfPurchase => "year_of_purchase",
            Self::ItemName => "item_name",
            Self::Quantity => "quantity",
            Self::InventoryNumber => "inventory_number",
            Self::RoomNumber => "room_number",
            Self::FloorNumber => "floor_number",
            Self::BuildingBlock => "building_block",
            Self::Remarks => "remarks",
            Self::DepartmentOrigin => "department_origin",
        }
    }

    /// Longest text the field accepts, in characters; `None` when unbounded.
    pub fn max_chars(&self) -> Option<usize> {
        match self {
            Self::ItemName | Self::InventoryNumber => Some(NAME_MAX_CHARS),
            Self::RoomNumber | Self::FloorNumber | Self::BuildingBlock => {
                Some(SHORT_TEXT_MAX_CHARS)
            }
            Self::YearOfPurchase | Self::Quantity | Self::Remarks | Self::DepartmentOrigin => None,
        }
    }

    /// Look up a field by JSON key; `None` for keys outside the allow-list.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// A single validated field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetChange {
    /// `None` clears the year.
    YearOfPurchase(Option<i32>),
    ItemName(String),
    Quantity(i32),
    InventoryNumber(String),
    RoomNumber(String),
    FloorNumber(String),
    BuildingBlock(String),
    Remarks(String),
    DepartmentOrigin(DepartmentOrigin),
}

impl AssetChange {
    pub fn field(&self) -> AssetField {
        match self {
            Self::YearOfPurchase(_) => AssetField::YearOfPurchase,
            Self::ItemName(_) => AssetField::ItemName,
            Self::Quantity(_) => AssetField::Quantity,
            Self::InventoryNumber(_) => AssetField::InventoryNumber,
            Self::RoomNumber(_) => AssetField::RoomNumber,
            Self::FloorNumber(_) => AssetField::FloorNumber,
            Self::BuildingBlock(_) => AssetField::BuildingBlock,
            Self::Remarks(_) => AssetField::Remarks,
            Self::DepartmentOrigin(_) => AssetField::DepartmentOrigin,
        }
    }
}

/// Non-empty set of allow-listed field assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPatch {
    changes: Vec<AssetChange>,
}

impl AssetPatch {
    /// Build a patch from a JSON object.
    ///
    /// Unknown keys are ignored. A `null` clears `year_of_purchase` and
    /// empties the free-text location fields; it is rejected for required
    /// fields.
    ///
    /// # Examples
    /// ```
    /// use inventory::domain::{AssetField, AssetPatch, AssetValidationError};
    /// use serde_json::json;
    ///
    /// let body = json!({ "quantity": 3, "colour": "red" });
    /// let patch = AssetPatch::from_fields(body.as_object().unwrap()).unwrap();
    /// assert_eq!(patch.fields().collect::<Vec<_>>(), vec![AssetField::Quantity]);
    ///
    /// let body = json!({ "id": 9 });
    /// let err = AssetPatch::from_fields(body.as_object().unwrap()).unwrap_err();
    /// assert_eq!(err, AssetValidationError::NoValidFields);
    /// ```
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, AssetValidationError> {
        let changes = fields
            .iter()
            .filter_map(|(key, value)| AssetField::from_key(key).map(|field| (field, value)))
            .map(|(field, value)| parse_change(field, value))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(changes)
    }

    /// Build a patch from already-typed changes.
    pub fn new(changes: Vec<AssetChange>) -> Result<Self, AssetValidationError> {
        if changes.is_empty() {
            return Err(AssetValidationError::NoValidFields);
        }
        Ok(Self { changes })
    }

    pub fn changes(&self) -> &[AssetChange] {
        &self.changes
    }

    /// Fields touched by this patch.
    pub fn fields(&self) -> impl Iterator<Item = AssetField> + '_ {
        self.changes.iter().map(AssetChange::field)
    }
}

fn parse_change(field: AssetField, value: &Value) -> Result<AssetChange, AssetValidationError> {
    let change = match field {
        AssetField::YearOfPurchase => match value {
            Value::Null => AssetChange::YearOfPurchase(None),
            other => AssetChange::YearOfPurchase(Some(integer(field, other)?)),
        },
        AssetField::ItemName => AssetChange::ItemName(required_patch_text(field, value)?),
        AssetField::Quantity => {
            let quantity = integer(field, value)?;
            if quantity < 0 {
                return Err(invalid(field, "must not be negative"));
            }
            AssetChange::Quantity(quantity)
        }
        AssetField::InventoryNumber => {
            AssetChange::InventoryNumber(required_patch_text(field, value)?)
        }
        AssetField::RoomNumber => AssetChange::RoomNumber(optional_text(field, value)?),
        AssetField::FloorNumber => AssetChange::FloorNumber(optional_text(field, value)?),
        AssetField::BuildingBlock => AssetChange::BuildingBlock(optional_text(field, value)?),
        AssetField::Remarks => AssetChange::Remarks(optional_text(field, value)?),
        AssetField::DepartmentOrigin => match value {
            Value::String(raw) => AssetChange::DepartmentOrigin(raw.parse()?),
            _ => return Err(invalid(field, "must be \"own\" or \"other\"")),
        },
    };
    Ok(change)
}

fn invalid(field: AssetField, reason: &'static str) -> AssetValidationError {
    AssetValidationError::InvalidField {
        field: field.key(),
        reason,
    }
}

fn integer(field: AssetField, value: &Value) -> Result<i32, AssetValidationError> {
    value
        .as_i64()
        .and_then(|raw| i32::try_from(raw).ok())
        .ok_or_else(|| invalid(field, "must be an integer"))
}

fn required_patch_text(field: AssetField, value: &Value) -> Result<String, AssetValidationError> {
    match value {
        Value::String(raw) if !raw.trim().is_empty() => bounded(field, raw.trim().to_owned()),
        Value::String(_) => Err(invalid(field, "must not be blank")),
        _ => Err(invalid(field, "must be a string")),
    }
}

fn optional_text(field: AssetField, value: &Value) -> Result<String, AssetValidationError> {
    match value {
        Value::String(raw) => bounded(field, raw.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(invalid(field, "must be a string")),
    }
}

/// Summed quantity of all records sharing an item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetTotal {
    #[schema(example = "Chair")]
    pub item_name: String,
    #[schema(example = 5)]
    pub total_quantity: i64,
}

#[cfg(test)]
mod tests;
