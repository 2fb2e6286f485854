//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the schema
//! wrappers for domain types and the session cookie security scheme. The
//! document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use crate::inbound::http::pets::{AgeInput, PetListResponse, PetRequest, PetResponse};
use crate::inbound::http::profile::{ProfileUpdateRequest, ProfileUpdateResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, SpeciesSchema, UserSchema};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pet registry API",
        description = "Session-authenticated registry of pets owned by users, with search, facets and owner-only mutation.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::delete_profile,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::get_pet,
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::update_pet,
        crate::inbound::http::pets::delete_pet,
        crate::inbound::http::breeds::list_breeds,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        SpeciesSchema,
        RegisterRequest,
        LoginRequest,
        ProfileUpdateRequest,
        ProfileUpdateResponse,
        AgeInput,
        PetRequest,
        PetResponse,
        PetListResponse,
    )),
    tags(
        (name = "users", description = "Registration and sessions"),
        (name = "profile", description = "The caller's own account"),
        (name = "pets", description = "Pet records"),
        (name = "breeds", description = "Breed suggestions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
