//! Role-based access policy.
//!
//! Every HTTP handler consults [`authorize`] before dispatching to a service,
//! so the policy is enforced server-side regardless of what a client shows.

use super::{Error, Role, User};

/// Operations subject to the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List, delete and reset the password of accounts.
    ManageUsers,
    /// Read the login log.
    ViewLogs,
    ReadAssets,
    CreateAsset,
    UpdateAsset,
}

/// Whether `role` may perform `operation`.
///
/// # Examples
/// ```
/// use inventory::domain::{Operation, Role, can_access};
///
/// assert!(can_access(Role::Head, Operation::ManageUsers));
/// assert!(!can_access(Role::Employee, Operation::ManageUsers));
/// assert!(can_access(Role::Employee, Operation::UpdateAsset));
/// ```
pub fn can_access(role: Role, operation: Operation) -> bool {
    match operation {
        Operation::ManageUsers | Operation::ViewLogs => role == Role::Head,
        Operation::ReadAssets | Operation::CreateAsset | Operation::UpdateAsset => true,
    }
}

/// Reject `user` with a forbidden error when the policy denies `operation`.
pub fn authorize(user: &User, operation: Operation) -> Result<(), Error> {
    if can_access(user.role(), operation) {
        Ok(())
    } else {
        Err(Error::forbidden("Insufficient role for this operation"))
    }
}

/// Whether an account with `requested` role may be registered.
///
/// Employee accounts are open to anyone. Head accounts need an authenticated
/// head, except while the credential store is empty.
pub fn can_register(requested: Role, requested_by: Option<Role>, store_is_empty: bool) -> bool {
    match requested {
        Role::Employee => true,
        Role::Head => store_is_empty || requested_by == Some(Role::Head),
    }
}
