//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the hasher) are implemented by outbound
//! adapters. Driving ports (use-cases) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_command;
mod asset_query;
mod asset_repository;
mod credential_hasher;
mod login_audit_query;
mod login_event_repository;
mod login_service;
mod registration_service;
mod user_admin_command;
mod user_repository;
mod users_query;

pub use asset_command::AssetCommand;
#[cfg(test)]
pub use asset_command::MockAssetCommand;
pub use asset_query::AssetQuery;
#[cfg(test)]
pub use asset_query::MockAssetQuery;
#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{AssetPersistenceError, AssetRepository};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use login_audit_query::LoginAuditQuery;
#[cfg(test)]
pub use login_audit_query::MockLoginAuditQuery;
#[cfg(test)]
pub use login_event_repository::MockLoginEventRepository;
pub use login_event_repository::{LoginEventPersistenceError, LoginEventRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
