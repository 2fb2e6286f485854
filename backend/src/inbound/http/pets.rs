//! Pet API handlers.
//!
//! ```text
//! GET /api/v1/pets?q=rex&type=DOG&page=2
//! GET /api/v1/pets/{id}
//! POST /api/v1/pets {"name":"Rex","age":3,"species":"DOG",...}
//! PUT /api/v1/pets/{id}
//! DELETE /api/v1/pets/{id}
//! ```
//!
//! Reads need any verified identity; writes are owner-only. The identity
//! check runs before query or path parsing. A listing page past the end
//! answers `307 Temporary Redirect` to the last page that has results,
//! keeping `q` and `type`.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{PAGE_PARAM, page_href};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::authorization::require_identity;
use crate::domain::{
    ListingOutcome, Pet, PetFields, PetFilter, PetListing, PetListingRequest, RawAge, SearchTerm,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SpeciesSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_page, parse_pet_id, parse_species_filter,
};

const PET_ID: FieldName = FieldName::new("id");
const TYPE_FILTER: FieldName = FieldName::new("type");
const PAGE: FieldName = FieldName::new(PAGE_PARAM);

/// Query string accepted by `GET /api/v1/pets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PetListQuery {
    /// Case-insensitive substring of name, breed or owner name.
    pub q: Option<String>,
    /// `DOG`, `CAT`, or `ALL`/empty for every species.
    #[serde(rename = "type")]
    pub species: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
}

/// Age as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AgeInput {
    Number(i64),
    Text(String),
}

/// Request body for creating or replacing a pet.
///
/// The species may be sent as `species` or `type`. Ownership is never
/// taken from the payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[serde(default)]
    pub name: String,
    pub age: Option<AgeInput>,
    #[serde(default, alias = "type")]
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_contact: String,
    pub image: Option<String>,
}

impl PetRequest {
    fn fields(&self) -> PetFields<'_> {
        let age = match &self.age {
            None => RawAge::Missing,
            Some(AgeInput::Number(value)) => RawAge::Number(*value),
            Some(AgeInput::Text(text)) => RawAge::Text(text),
        };
        PetFields {
            name: &self.name,
            age,
            species: &self.species,
            breed: &self.breed,
            owner_name: &self.owner_name,
            owner_contact: &self.owner_contact,
            image: self.image.as_deref(),
        }
    }
}

/// A pet as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    pub age: u8,
    #[schema(value_type = SpeciesSchema)]
    pub species: String,
    pub breed: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub image: Option<String>,
    pub owner_user_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(value: Pet) -> Self {
        let Pet {
            id,
            owner_user_id,
            draft,
            created_at,
            updated_at,
        } = value;
        Self {
            id: id.to_string(),
            name: draft.name.into(),
            age: draft.age.years(),
            species: draft.species.as_str().to_owned(),
            breed: draft.breed.into(),
            owner_name: draft.owner_name.into(),
            owner_contact: draft.owner_contact.into(),
            image: draft.image,
            owner_user_id: owner_user_id.into(),
            created_at,
            updated_at,
        }
    }
}

/// One page of pets with the counts needed for pagination and facets.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetListResponse {
    pub items: Vec<PetResponse>,
    /// Pets matching both the search term and the species filter.
    pub query_total: u64,
    /// Pets matching the search term, whatever their species.
    pub global_total: u64,
    pub dog_count: u64,
    pub cat_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<PetListing> for PetListResponse {
    fn from(value: PetListing) -> Self {
        let PetListing {
            items,
            window,
            facets,
        } = value;
        Self {
            items: items.into_iter().map(PetResponse::from).collect(),
            query_total: window.total_items(),
            global_total: facets.total(),
            dog_count: facets.dogs,
            cat_count: facets.cats,
            page: window.page().get(),
            page_size: window.page_size().get(),
            total_pages: window.total_pages(),
        }
    }
}

fn listing_request(query: &PetListQuery) -> ApiResult<PetListingRequest> {
    let species = parse_species_filter(query.species.as_deref(), TYPE_FILTER)?;
    let page = parse_page(query.page.as_deref(), PAGE)?;
    let term = query.q.as_deref().and_then(SearchTerm::parse);
    Ok(PetListingRequest {
        filter: PetFilter::new(term, species),
        page,
    })
}

fn redirect_location(path: &str, filter: &PetFilter, page: pagination::PageNumber) -> String {
    let term = filter.term.as_ref().map_or("", SearchTerm::as_str);
    let species = filter.species.map_or("", |species| species.as_str());
    page_href(path, &[("q", term), ("type", species)], page)
}

/// List pets matching a search term and species filter.
#[utoipa::path(
    get,
    path = "/api/v1/pets",
    params(PetListQuery),
    responses(
        (status = 200, description = "One page of pets", body = PetListResponse),
        (status = 307, description = "Requested page is past the end", headers(("Location" = String, description = "Last page with results"))),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/pets")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<PetListQuery>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    // Anonymous callers learn nothing about query shape.
    require_identity(&caller)?;
    let listing = listing_request(&query)?;
    match state.pets.list(&caller, listing).await? {
        ListingOutcome::Page(page) => Ok(HttpResponse::Ok().json(PetListResponse::from(page))),
        ListingOutcome::Redirect { filter, page } => Ok(HttpResponse::TemporaryRedirect()
            .insert_header((
                header::LOCATION,
                redirect_location(request.path(), &filter, page),
            ))
            .finish()),
    }
}

/// Fetch one pet. Reads are not owner-scoped.
#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    params(("id" = String, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet", body = PetResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "getPet"
)]
#[get("/pets/{id}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PetResponse>> {
    let caller = session.caller()?;
    require_identity(&caller)?;
    let id = parse_pet_id(&path, PET_ID)?;
    let pet = state.pets.fetch(&caller, &id).await?;
    Ok(web::Json(PetResponse::from(pet)))
}

/// Register a pet owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/pets",
    request_body = PetRequest,
    responses(
        (status = 201, description = "Pet created", body = PetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/pets")]
pub async fn create_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PetRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let pet = state.pets_command.create(&caller, payload.fields()).await?;
    Ok(HttpResponse::Created().json(PetResponse::from(pet)))
}

/// Replace the fields of a pet the caller owns.
#[utoipa::path(
    put,
    path = "/api/v1/pets/{id}",
    params(("id" = String, Path, description = "Pet identifier")),
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "updatePet"
)]
#[put("/pets/{id}")]
pub async fn update_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PetRequest>,
) -> ApiResult<web::Json<PetResponse>> {
    let caller = session.caller()?;
    require_identity(&caller)?;
    let id = parse_pet_id(&path, PET_ID)?;
    let pet = state
        .pets_command
        .update(&caller, &id, payload.fields())
        .await?;
    Ok(web::Json(PetResponse::from(pet)))
}

/// Delete a pet the caller owns.
#[utoipa::path(
    delete,
    path = "/api/v1/pets/{id}",
    params(("id" = String, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "deletePet"
)]
#[delete("/pets/{id}")]
pub async fn delete_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    require_identity(&caller)?;
    let id = parse_pet_id(&path, PET_ID)?;
    state.pets_command.delete(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
