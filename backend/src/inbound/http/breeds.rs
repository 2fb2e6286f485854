//! Breed suggestion handler.
//!
//! ```text
//! GET /api/v1/breeds?species=DOG
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_species_filter};

/// Query string accepted by `GET /api/v1/breeds`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BreedsQueryParams {
    /// `DOG` or `CAT`; absent or `ALL` lists both.
    pub species: Option<String>,
}

/// Breed names for autocomplete, ordered by name.
///
/// Suggestions only: pets may use breeds outside this list.
#[utoipa::path(
    get,
    path = "/api/v1/breeds",
    params(BreedsQueryParams),
    responses(
        (status = 200, description = "Ordered breed names", body = [String]),
        (status = 400, description = "Unknown species", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breeds"],
    operation_id = "listBreeds",
    security([])
)]
#[get("/breeds")]
pub async fn list_breeds(
    state: web::Data<HttpState>,
    query: web::Query<BreedsQueryParams>,
) -> ApiResult<web::Json<Vec<String>>> {
    let species = parse_species_filter(query.species.as_deref(), FieldName::new("species"))?;
    let names = state.breeds.names(species).await?;
    Ok(web::Json(names))
}
