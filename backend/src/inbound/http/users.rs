//! Account API handlers.
//!
//! ```text
//! POST /api/login {"email":"ada@example.com","password":"secret1"}
//! POST /api/register {"name":"Ada","email":"ada@example.com","password":"secret1"}
//! GET /api/users
//! PUT /api/users/7/reset-password {"password":"hunter22"}
//! DELETE /api/users/7
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, NewPassword, Operation, Registration, Role, User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{require_access, require_user, session_user};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    login_error, parse_user_id, password_error, registration_error,
};

/// Login request body for `POST /api/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Account envelope returned by login and session lookups.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}

/// Registration request body for `POST /api/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `employee`.
    pub role: Option<Role>,
}

/// Response of a successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredResponse {
    pub success: bool,
    #[schema(value_type = i64, example = 7)]
    pub id: UserId,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) fn ok() -> Self {
        Self { success: true }
    }
}

/// Replacement password for `PUT /api/users/{id}/reset-password`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserEnvelope,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(login_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id())?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Logged out", body = SuccessResponse)),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> web::Json<SuccessResponse> {
    session.purge();
    web::Json(SuccessResponse::ok())
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current account", body = UserEnvelope),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserEnvelope>> {
    let user = require_user(&session, state.users.as_ref()).await?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Create an account.
///
/// Employee accounts may be registered by anyone. Head accounts need a
/// signed-in head unless no account exists yet.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = RegisteredResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<RegisteredResponse>> {
    let RegisterRequest {
        name,
        email,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password, role)
        .map_err(|err| registration_error(&err))?;
    let requested_by = session_user(&session, state.users.as_ref())
        .await?
        .map(|user| user.role());
    let id = state
        .registration
        .register(&registration, requested_by)
        .await?;
    Ok(web::Json(RegisteredResponse { success: true, id }))
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    require_access(&session, state.users.as_ref(), Operation::ManageUsers).await?;
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Replace an account's password.
#[utoipa::path(
    put,
    path = "/api/users/{id}/reset-password",
    params(("id" = i64, Path, description = "Account id")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "resetPassword"
)]
#[put("/users/{id}/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let actor = require_access(&session, state.users.as_ref(), Operation::ManageUsers).await?;
    let id = parse_user_id(&path.into_inner())?;
    let password = NewPassword::try_new(&payload.password).map_err(|err| password_error(&err))?;
    state.user_admin.reset_password(&id, &password).await?;
    info!(actor = %actor.id(), user_id = %id, "password reset");
    Ok(web::Json(SuccessResponse::ok()))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let actor = require_access(&session, state.users.as_ref(), Operation::ManageUsers).await?;
    let id = parse_user_id(&path.into_inner())?;
    state.user_admin.delete_user(&id).await?;
    info!(actor = %actor.id(), user_id = %id, "account deleted");
    Ok(web::Json(SuccessResponse::ok()))
}
