//! Resolution of the signed-in account for HTTP handlers.
//!
//! The session cookie only carries a user id. Every protected handler turns
//! it back into a [`User`] through [`UsersQuery`] and checks the role policy
//! before touching a service, so a deleted account loses access on the very
//! next request.

use tracing::info;

use crate::domain::ports::UsersQuery;
use crate::domain::{Error, Operation, User, authorize};

use super::ApiResult;
use super::session::SessionContext;

/// Load the account behind the session, if any.
///
/// A session naming an account that no longer exists is purged.
pub async fn session_user(
    session: &SessionContext,
    users: &dyn UsersQuery,
) -> ApiResult<Option<User>> {
    let Some(id) = session.user_id()? else {
        return Ok(None);
    };
    match users.find_user(&id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            info!(user_id = %id, "session refers to a deleted account; purging");
            session.purge();
            Ok(None)
        }
    }
}

/// Require a signed-in account or return `401 Unauthorized`.
pub async fn require_user(session: &SessionContext, users: &dyn UsersQuery) -> ApiResult<User> {
    session_user(session, users)
        .await?
        .ok_or_else(|| Error::unauthorized("Login required"))
}

/// Require a signed-in account allowed to perform `operation`.
pub async fn require_access(
    session: &SessionContext,
    users: &dyn UsersQuery,
    operation: Operation,
) -> ApiResult<User> {
    let user = require_user(session, users).await?;
    authorize(&user, operation)?;
    Ok(user)
}
