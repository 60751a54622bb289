//! Account and credential services.
//!
//! [`CredentialService`] implements the account driving ports on top of the
//! credential store, the login log and the password hasher. Hashing is
//! delegated to [`CredentialHasher`], whose adapters run off the executor.
//!
//! Logins for unknown emails still run one password verification against a
//! decoy hash, so response time does not reveal which emails are registered.
//! Head bootstrap registrations are serialised within the process so the
//! "store is empty" check and the insert cannot interleave.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, LoginAuditQuery, LoginEventPersistenceError,
    LoginEventRepository, LoginService, RegistrationService, UserAdminCommand,
    UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{
    Error, LogLimit, LoginCredentials, LoginEvent, NewLoginEvent, NewPassword, NewUserRecord,
    PasswordHash, Registration, Role, User, UserId, can_register,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const DECOY_PASSWORD: &str = "inventory-decoy-password";

/// Credential service implementing the account driving ports.
#[derive(Clone)]
pub struct CredentialService<U, L, H> {
    users: Arc<U>,
    login_events: Arc<L>,
    hasher: Arc<H>,
    decoy_hash: Arc<OnceCell<PasswordHash>>,
    bootstrap: Arc<Mutex<()>>,
}

impl<U, L, H> CredentialService<U, L, H> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, login_events: Arc<L>, hasher: Arc<H>) -> Self {
        Self {
            users,
            login_events,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
            bootstrap: Arc::new(Mutex::new(())),
        }
    }
}

fn map_user_error(context: &'static str, error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("Email already registered"),
        other => Error::storage(context, other.to_string()),
    }
}

fn map_event_error(error: LoginEventPersistenceError) -> Error {
    Error::storage("Database error", error.to_string())
}

fn map_hash_error(context: &'static str, error: CredentialHashError) -> Error {
    Error::storage(context, error.to_string())
}

impl<U, L, H> CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    /// Append a login attempt to the audit log.
    ///
    /// The log is best effort: a failed write never changes the login outcome.
    async fn record_attempt(&self, user_id: Option<UserId>, email: &str, succeeded: bool) {
        let event = NewLoginEvent {
            user_id,
            email: email.to_owned(),
            succeeded,
        };
        if let Err(error) = self.login_events.record(&event).await {
            warn!(%error, succeeded, "failed to record login attempt");
        }
    }

    /// Verify `password` against a decoy hash and discard the result.
    ///
    /// The decoy is hashed once with the live hasher so it carries the same
    /// cost parameters as stored hashes.
    async fn verify_against_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(Zeroizing::new(DECOY_PASSWORD.to_owned())))
            .await;
        let outcome = match decoy {
            Ok(decoy) => {
                self.hasher
                    .verify(Zeroizing::new(password.to_owned()), decoy.clone())
                    .await
            }
            Err(error) => Err(error),
        };
        if let Err(error) = outcome {
            warn!(%error, "decoy password verification failed");
        }
    }

    async fn store_is_empty(&self) -> Result<bool, Error> {
        let count = self
            .users
            .count()
            .await
            .map_err(|err| map_user_error("Registration failed", err))?;
        Ok(count == 0)
    }
}

#[async_trait]
impl<U, L, H> LoginService for CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| map_user_error("Login failed", err))?;

        let Some(stored) = stored else {
            self.verify_against_decoy(credentials.password()).await;
            self.record_attempt(None, credentials.email(), false).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let user_id = stored.user().id();
        let verified = self
            .hasher
            .verify(
                Zeroizing::new(credentials.password().to_owned()),
                stored.password_hash().clone(),
            )
            .await
            .map_err(|err| map_hash_error("Login failed", err))?;

        self.record_attempt(Some(user_id), credentials.email(), verified)
            .await;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.into_user())
    }
}

#[async_trait]
impl<U, L, H> RegistrationService for CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    async fn register(
        &self,
        registration: &Registration,
        requested_by: Option<Role>,
    ) -> Result<UserId, Error> {
        let needs_bootstrap_check =
            registration.role() == Role::Head && requested_by != Some(Role::Head);
        // Held until the insert lands so a second bootstrap sees the first head.
        let _bootstrap_guard = if needs_bootstrap_check {
            Some(self.bootstrap.lock().await)
        } else {
            None
        };
        let store_is_empty = needs_bootstrap_check && self.store_is_empty().await?;
        if !can_register(registration.role(), requested_by, store_is_empty) {
            return Err(Error::forbidden("Only a head may register a head account"));
        }

        let password_hash = self
            .hasher
            .hash(Zeroizing::new(registration.password().to_owned()))
            .await
            .map_err(|err| map_hash_error("Registration failed", err))?;

        let record = NewUserRecord {
            name: registration.name().to_owned(),
            email: registration.email().to_owned(),
            password_hash,
            role: registration.role(),
        };
        let id = self
            .users
            .insert(&record)
            .await
            .map_err(|err| map_user_error("Registration failed", err))?;
        info!(user_id = %id, role = %record.role, "registered account");
        Ok(id)
    }
}

#[async_trait]
impl<U, L, H> UsersQuery for CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .map_err(|err| map_user_error("Database error", err))
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| map_user_error("Database error", err))
    }
}

#[async_trait]
impl<U, L, H> UserAdminCommand for CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    async fn reset_password(&self, id: &UserId, password: &NewPassword) -> Result<(), Error> {
        let hash = self
            .hasher
            .hash(Zeroizing::new(password.as_str().to_owned()))
            .await
            .map_err(|err| map_hash_error("Failed to reset password", err))?;
        let updated = self
            .users
            .set_password_hash(id, &hash)
            .await
            .map_err(|err| map_user_error("Failed to reset password", err))?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        info!(user_id = %id, "password reset");
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete_by_id(id)
            .await
            .map_err(|err| map_user_error("Failed to delete user", err))?;
        if !deleted {
            return Err(Error::not_found("User not found"));
        }
        info!(user_id = %id, "deleted account");
        Ok(())
    }
}

#[async_trait]
impl<U, L, H> LoginAuditQuery for CredentialService<U, L, H>
where
    U: UserRepository,
    L: LoginEventRepository,
    H: CredentialHasher,
{
    async fn list_login_events(&self, limit: LogLimit) -> Result<Vec<LoginEvent>, Error> {
        self.login_events
            .recent(limit)
            .await
            .map_err(map_event_error)
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
