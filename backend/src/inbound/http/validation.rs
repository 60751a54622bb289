//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{
    AssetId, Error, LoginValidationError, PasswordValidationError, RegistrationValidationError,
    UserId,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    InvalidId,
    WeakPassword,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::WeakPassword => "weak_password",
        }
    }
}

fn field_error(message: impl Into<String>, field: &str, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn parse_positive(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Parse a user id taken from the request path.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_positive(raw)
        .and_then(|id| UserId::new(id).ok())
        .ok_or_else(|| field_error("Invalid user id", "id", ErrorCode::InvalidId))
}

/// Parse an asset id taken from the request path.
pub(crate) fn parse_asset_id(raw: &str) -> Result<AssetId, Error> {
    parse_positive(raw)
        .and_then(|id| AssetId::new(id).ok())
        .ok_or_else(|| field_error("Invalid asset id", "id", ErrorCode::InvalidId))
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error("Missing email or password", field, ErrorCode::MissingField)
}

pub(crate) fn registration_error(err: &RegistrationValidationError) -> Error {
    if err.is_missing() {
        field_error("Missing required fields", err.field(), ErrorCode::MissingField)
    } else {
        field_error(err.to_string(), err.field(), ErrorCode::InvalidField)
    }
}

pub(crate) fn password_error(err: &PasswordValidationError) -> Error {
    Error::invalid_request(format!(
        "Password must be at least {} characters",
        err.min
    ))
    .with_details(json!({
        "field": "password",
        "code": ErrorCode::WeakPassword.as_str(),
        "min": err.min,
    }))
}
