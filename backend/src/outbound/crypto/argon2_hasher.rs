//! Argon2id implementation of the `CredentialHasher` port.
//!
//! Hashes are PHC strings with a fresh 16-byte salt from the OS generator.
//! Both hashing and verification run on tokio's blocking pool so a login
//! never stalls the executor threads serving other requests.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use async_trait::async_trait;
use password_hash::{PasswordHash as PhcHash, SaltString};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

const SALT_LEN: usize = 16;

/// Argon2 work factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher with fixed work factors.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Build a hasher, rejecting work factors argon2 does not accept.
    ///
    /// # Examples
    /// ```
    /// use inventory::outbound::crypto::{Argon2Hasher, HashCost};
    ///
    /// assert!(Argon2Hasher::new(HashCost::default()).is_ok());
    /// assert!(Argon2Hasher::new(HashCost { memory_kib: 0, iterations: 0, parallelism: 0 }).is_err());
    /// ```
    pub fn new(cost: HashCost) -> Result<Self, CredentialHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &[u8]) -> Result<String, CredentialHashError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
    let phc = argon2
        .hash_password(password, &salt)
        .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
    Ok(phc.to_string())
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &[u8],
    encoded: &str,
) -> Result<bool, CredentialHashError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| CredentialHashError::malformed_hash(err.to_string()))?;
    match argon2.verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialHashError::malformed_hash(err.to_string())),
    }
}

fn join_error(err: tokio::task::JoinError) -> CredentialHashError {
    CredentialHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: Zeroizing<String>) -> Result<PasswordHash, CredentialHashError> {
        let argon2 = self.argon2();
        let encoded =
            tokio::task::spawn_blocking(move || hash_blocking(&argon2, password.as_bytes()))
                .await
                .map_err(join_error)??;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        password: Zeroizing<String>,
        hash: PasswordHash,
    ) -> Result<bool, CredentialHashError> {
        let argon2 = self.argon2();
        tokio::task::spawn_blocking(move || {
            verify_blocking(&argon2, password.as_bytes(), hash.as_str())
        })
        .await
        .map_err(join_error)?
    }
}
