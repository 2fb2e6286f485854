//! Profile API handlers.
//!
//! ```text
//! GET /api/v1/profile
//! POST /api/v1/profile/update {"name":"Ana","email":"ana@example.com","currentPassword":"secret1"}
//! POST /api/v1/profile/delete
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ProfileFields, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/profile/update`.
///
/// `currentPassword` is only required when `email` or `newPassword`
/// changes. A blank `newPassword` leaves the password untouched.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl ProfileUpdateRequest {
    fn fields(&self) -> ProfileFields<'_> {
        ProfileFields {
            name: &self.name,
            email: &self.email,
            current_password: self.current_password.as_deref(),
            new_password: self.new_password.as_deref(),
        }
    }
}

/// Success body for a profile update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    pub message: String,
    /// Clients should refresh any cached name or email.
    pub refresh_identity: bool,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let caller = session.caller()?;
    let user = state.profile.fetch(&caller).await?;
    Ok(web::Json(user))
}

/// Update name, email or password.
///
/// Changing the email or password needs `currentPassword`; shape checks
/// run before that requirement is enforced.
#[utoipa::path(
    post,
    path = "/api/v1/profile/update",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdateResponse),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Current password required or wrong", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[post("/profile/update")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<ProfileUpdateResponse>> {
    let caller = session.caller()?;
    let user = state
        .profile_command
        .update(&caller, payload.fields())
        .await?;
    Ok(web::Json(ProfileUpdateResponse {
        message: "Profile updated".to_owned(),
        refresh_identity: true,
        user,
    }))
}

/// Delete the caller's account and every pet it owns, then end the
/// session.
#[utoipa::path(
    post,
    path = "/api/v1/profile/delete",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "deleteProfile"
)]
#[post("/profile/delete")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    state.profile_command.delete(&caller).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
