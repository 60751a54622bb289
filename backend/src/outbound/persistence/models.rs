//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain values live here
//! so the repositories stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;

use crate::domain::{
    Asset, AssetChange, AssetId, AssetPatch, AssetTotal, DepartmentOrigin, LoginEvent,
    NewAsset, NewLoginEvent, NewUserRecord, PasswordHash, Role, StoredCredentials, User, UserId,
};

use super::schema::{assets, login_events, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Users row including the password hash, for credential lookups only.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_hash: String,
}

/// Row values that could not be turned into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("stored id {0} is not a positive integer")]
    InvalidId(i64),
    #[error("stored role {0:?} is not recognised")]
    UnknownRole(String),
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|_| RowConversionError::InvalidId(row.id))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|_| RowConversionError::UnknownRole(row.role.clone()))?;
        Ok(User::new(id, row.name, row.email, role, row.created_at))
    }
}

impl TryFrom<CredentialRow> for StoredCredentials {
    type Error = RowConversionError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let user = User::try_from(row.user)?;
        Ok(StoredCredentials::new(user, PasswordHash::new(row.password_hash)))
    }
}

/// Insertable struct for creating new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a NewUserRecord> for NewUserRow<'a> {
    fn from(record: &'a NewUserRecord) -> Self {
        Self {
            name: record.name.as_str(),
            email: record.email.as_str(),
            password_hash: record.password_hash.as_str(),
            role: record.role.as_str(),
        }
    }
}

/// Row struct for reading from the assets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssetRow {
    pub id: i64,
    pub year_of_purchase: Option<i32>,
    pub item_name: String,
    pub quantity: i32,
    pub inventory_number: String,
    pub room_number: String,
    pub floor_number: String,
    pub building_block: String,
    pub remarks: String,
    pub department_origin: String,
    pub last_updated: DateTime<Utc>,
}

fn parse_origin(raw: &str, asset_id: i64) -> DepartmentOrigin {
    raw.parse().unwrap_or_else(|_| {
        warn!(
            value = raw,
            asset_id, "unrecognised department_origin value, defaulting to own"
        );
        DepartmentOrigin::Own
    })
}

impl TryFrom<AssetRow> for Asset {
    type Error = RowConversionError;

    fn try_from(row: AssetRow) -> Result<Self, Self::Error> {
        let id = AssetId::new(row.id).map_err(|_| RowConversionError::InvalidId(row.id))?;
        let department_origin = parse_origin(&row.department_origin, row.id);
        Ok(Asset {
            id,
            year_of_purchase: row.year_of_purchase,
            item_name: row.item_name,
            quantity: row.quantity,
            inventory_number: row.inventory_number,
            room_number: row.room_number,
            floor_number: row.floor_number,
            building_block: row.building_block,
            remarks: row.remarks,
            department_origin,
            last_updated: row.last_updated,
        })
    }
}

/// Insertable struct for creating asset records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub(crate) struct NewAssetRow<'a> {
    pub year_of_purchase: Option<i32>,
    pub item_name: &'a str,
    pub quantity: i32,
    pub inventory_number: &'a str,
    pub room_number: &'a str,
    pub floor_number: &'a str,
    pub building_block: &'a str,
    pub remarks: &'a str,
    pub department_origin: &'static str,
}

impl<'a> From<&'a NewAsset> for NewAssetRow<'a> {
    fn from(asset: &'a NewAsset) -> Self {
        Self {
            year_of_purchase: asset.year_of_purchase,
            item_name: asset.item_name.as_str(),
            quantity: asset.quantity,
            inventory_number: asset.inventory_number.as_str(),
            room_number: asset.room_number.as_str(),
            floor_number: asset.floor_number.as_str(),
            building_block: asset.building_block.as_str(),
            remarks: asset.remarks.as_str(),
            department_origin: asset.department_origin.as_str(),
        }
    }
}

/// Changeset for a partial asset update.
///
/// `None` leaves a column untouched; `year_of_purchase: Some(None)` writes
/// NULL. `last_updated` is always set, so the changeset is never empty.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = assets)]
pub(crate) struct AssetChangeset {
    pub year_of_purchase: Option<Option<i32>>,
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub inventory_number: Option<String>,
    pub room_number: Option<String>,
    pub floor_number: Option<String>,
    pub building_block: Option<String>,
    pub remarks: Option<String>,
    pub department_origin: Option<&'static str>,
    pub last_updated: DateTime<Utc>,
}

impl AssetChangeset {
    pub(crate) fn from_patch(patch: &AssetPatch, now: DateTime<Utc>) -> Self {
        let mut changeset = Self {
            year_of_purchase: None,
            item_name: None,
            quantity: None,
            inventory_number: None,
            room_number: None,
            floor_number: None,
            building_block: None,
            remarks: None,
            department_origin: None,
            last_updated: now,
        };
        for change in patch.changes() {
            match change.clone() {
                AssetChange::YearOfPurchase(value) => changeset.year_of_purchase = Some(value),
                AssetChange::ItemName(value) => changeset.item_name = Some(value),
                AssetChange::Quantity(value) => changeset.quantity = Some(value),
                AssetChange::InventoryNumber(value) => changeset.inventory_number = Some(value),
                AssetChange::RoomNumber(value) => changeset.room_number = Some(value),
                AssetChange::FloorNumber(value) => changeset.floor_number = Some(value),
                AssetChange::BuildingBlock(value) => changeset.building_block = Some(value),
                AssetChange::Remarks(value) => changeset.remarks = Some(value),
                AssetChange::DepartmentOrigin(value) => {
                    changeset.department_origin = Some(value.as_str());
                }
            }
        }
        changeset
    }
}

/// `(item_name, SUM(quantity))` as loaded from the totals query.
pub(crate) type AssetTotalRow = (String, Option<i64>);

pub(crate) fn total_from_row((item_name, total): AssetTotalRow) -> AssetTotal {
    AssetTotal {
        item_name,
        total_quantity: total.unwrap_or(0),
    }
}

/// Row struct for reading from the login_events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = login_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LoginEventRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    pub succeeded: bool,
    pub occurred_at: DateTime<Utc>,
}

impl TryFrom<LoginEventRow> for LoginEvent {
    type Error = RowConversionError;

    fn try_from(row: LoginEventRow) -> Result<Self, Self::Error> {
        let user_id = row
            .user_id
            .map(|raw| UserId::new(raw).map_err(|_| RowConversionError::InvalidId(raw)))
            .transpose()?;
        Ok(LoginEvent {
            id: row.id,
            user_id,
            email: row.email,
            succeeded: row.succeeded,
            occurred_at: row.occurred_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = login_events)]
pub(crate) struct NewLoginEventRow<'a> {
    pub user_id: Option<i64>,
    pub email: &'a str,
    pub succeeded: bool,
}

impl<'a> From<&'a NewLoginEvent> for NewLoginEventRow<'a> {
    fn from(event: &'a NewLoginEvent) -> Self {
        Self {
            user_id: event.user_id.map(|id| id.as_i64()),
            email: event.email.as_str(),
            succeeded: event.succeeded,
        }
    }
}
