//! Authentication primitives: login credentials, registrations and
//! replacement passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Plaintext passwords are held in [`Zeroizing`] buffers.

use std::fmt;

use zeroize::Zeroizing;

use super::Role;

/// Minimum accepted length, in characters, of a replacement password.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Longest accepted account name or email, in characters.
pub const ACCOUNT_TEXT_MAX_CHARS: usize = 255;

/// Canonical form of an email address: trimmed and lowercased, so lookups
/// and the uniqueness check ignore case.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and must not be empty.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use inventory::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the credential lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors for new account registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    EmptyName,
    EmptyEmail,
    EmptyPassword,
    NameTooLong,
    EmailTooLong,
}

impl RegistrationValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong => "name",
            Self::EmptyEmail | Self::EmailTooLong => "email",
            Self::EmptyPassword => "password",
        }
    }

    /// Whether the field was absent rather than malformed.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::EmptyEmail | Self::EmptyPassword
        )
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "{} must not be empty", self.field())
        } else {
            write!(
                f,
                "{} must be at most {ACCOUNT_TEXT_MAX_CHARS} characters",
                self.field()
            )
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated request to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate raw registration input. The role defaults to employee.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Self, RegistrationValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationValidationError::EmptyName);
        }
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(RegistrationValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if name.chars().count() > ACCOUNT_TEXT_MAX_CHARS {
            return Err(RegistrationValidationError::NameTooLong);
        }
        if email.chars().count() > ACCOUNT_TEXT_MAX_CHARS {
            return Err(RegistrationValidationError::EmailTooLong);
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
            role: role.unwrap_or_default(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Replacement password was too short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordValidationError {
    pub min: usize,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "password must be at least {} characters", self.min)
    }
}

impl std::error::Error for PasswordValidationError {}

/// Replacement password of at least [`MIN_PASSWORD_LENGTH`] characters.
///
/// # Examples
/// ```
/// use inventory::domain::NewPassword;
///
/// assert!(NewPassword::try_new("abc").is_err());
/// assert!(NewPassword::try_new("abcdef").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    pub fn try_new(password: &str) -> Result<Self, PasswordValidationError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordValidationError {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
