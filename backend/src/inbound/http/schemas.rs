//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No verified identity accompanies the request.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the record.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The email address already belongs to another account.
    #[schema(rename = "email_taken")]
    EmailTaken,
    /// The change needs the current password.
    #[schema(rename = "reauth_required")]
    ReauthRequired,
    /// The record store cannot be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "validation failed")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "9b2e8f3c-4d1a-4c2e-8f6b-1a2b3c4d5e6f")]
    trace_id: Option<String>,
    /// Supplementary error details, such as per-field violations.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Public account view. Credentials are never serialised.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name.
    #[schema(value_type = String, example = "Vitor Admin")]
    name: String,
    /// Lower-cased email address.
    #[schema(value_type = String, example = "admin@test.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::Species`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Species)]
pub enum SpeciesSchema {
    /// Dogs.
    #[schema(rename = "DOG")]
    Dog,
    /// Cats.
    #[schema(rename = "CAT")]
    Cat,
}
