//! Port for the password hashing primitive.
//!
//! Hashing is deliberately slow; adapters must keep it off the async
//! executor threads.
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum CredentialHashError {
        /// Salt generation or hashing failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    async fn hash(&self, password: Zeroizing<String>) -> Result<PasswordHash, CredentialHashError>;

    /// Check `password` against `hash` in constant time.
    async fn verify(
        &self,
        password: Zeroizing<String>,
        hash: PasswordHash,
    ) -> Result<bool, CredentialHashError>;
}
