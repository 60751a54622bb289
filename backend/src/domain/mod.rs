//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities (accounts, assets, login events),
//! the role policy, and the services implementing the driving ports. Keep
//! types transport agnostic and document serialisation contracts (serde) on
//! each type.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable code.
//! - User, Role, UserId: account identity.
//! - Asset, AssetPatch, AssetField: asset records and the update allow-list.
//! - can_access / Operation: role policy.
//! - CredentialService / AssetService: driving port implementations.

pub mod access;
pub mod asset;
mod asset_service;
pub mod auth;
mod credential_service;
pub mod error;
pub mod login_event;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::access::{Operation, authorize, can_access, can_register};
pub use self::asset::{
    Asset, AssetChange, AssetDraft, AssetField, AssetId, AssetPatch, AssetTotal,
    AssetValidationError, DepartmentOrigin, NewAsset,
};
pub use self::asset_service::AssetService;
pub use self::auth::{
    ACCOUNT_TEXT_MAX_CHARS, LoginCredentials, LoginValidationError, MIN_PASSWORD_LENGTH,
    NewPassword, PasswordValidationError, Registration, RegistrationValidationError,
    normalize_email,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_event::{LogLimit, LoginEvent, NewLoginEvent};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewUserRecord, PasswordHash, Role, StoredCredentials, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use inventory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
