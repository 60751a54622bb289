//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When
//! migrations change, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// Staff accounts. `email` is unique.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        /// `head` or `employee`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Physical asset records.
    assets (id) {
        id -> Int8,
        year_of_purchase -> Nullable<Int4>,
        item_name -> Varchar,
        quantity -> Int4,
        inventory_number -> Varchar,
        room_number -> Varchar,
        floor_number -> Varchar,
        building_block -> Varchar,
        remarks -> Text,
        /// `own` or `other`.
        department_origin -> Varchar,
        last_updated -> Timestamptz,
    }
}

diesel::table! {
    /// One row per login attempt.
    login_events (id) {
        id -> Int8,
        user_id -> Nullable<Int8>,
        email -> Varchar,
        succeeded -> Bool,
        occurred_at -> Timestamptz,
    }
}

diesel::joinable!(login_events -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(assets, login_events, users);
