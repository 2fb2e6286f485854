//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"name":"Ana","email":"ana@example.com","password":"secret1"}
//! POST /api/v1/login {"email":"ana@example.com","password":"secret1"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Error, FieldViolation, LoginCredentials, LoginValidationError, Registration, User, Violations,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"admin@test.com","password":"password123"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let violation = match &err {
        LoginValidationError::InvalidEmail(_) => {
            FieldViolation::new("email", "invalid_email", err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            FieldViolation::new("password", "empty_password", err.to_string())
        }
    };
    let mut violations = Violations::new();
    violations.push(violation);
    Error::from(violations)
}

/// Create an account. The password is never echoed.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password)?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a user and establish a session.
///
/// Unknown emails and wrong passwords both answer 401.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserSchema, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
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
) -> ApiResult<web::Json<User>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    debug!("session purged on logout");
    session.purge();
    HttpResponse::NoContent().finish()
}
