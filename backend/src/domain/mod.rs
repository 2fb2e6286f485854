//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for accounts, pets and breeds,
//! the rules that guard them, and the services inbound adapters drive.
//! Infrastructure is reached only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) - stable error identifier.
//! - User, UserAccount - account identity with and without credentials.
//! - Pet, PetDraft, Species - registered animals and their payload.
//! - Caller - the identity (if any) behind a request.
//! - PetsService, AccountsService, ProfileService, BreedsService -
//!   implementations of the driving ports.

pub mod accounts_service;
pub mod auth;
pub mod authorization;
pub mod breed;
pub mod breeds_service;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod pet;
pub mod pet_search;
pub mod pets_service;
pub mod ports;
pub mod profile_service;
pub mod trace_id;
pub mod user;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use self::accounts_service::AccountsService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, NewPassword, PASSWORD_MIN_LENGTH, PasswordDigest,
    PasswordValidationError, ProfileFields, ProfileUpdate, Registration,
};
pub use self::authorization::{AccessDenied, Caller};
pub use self::breed::Breed;
pub use self::breeds_service::BreedsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
#[cfg(feature = "example-data")]
pub use self::example_data::{ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError};
pub use self::pet::{
    PET_TEXT_MAX, Pet, PetAge, PetAgeError, PetDraft, PetFields, PetId, PetText, PetTextError,
    RawAge, Species, UnknownSpecies,
};
pub use self::pet_search::{
    ListingOutcome, PET_PAGE_SIZE, PetFilter, PetListing, PetListingRequest, SearchField,
    SearchTerm, SpeciesFacets,
};
pub use self::pets_service::PetsService;
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, EmailAddress, User, UserAccount, UserId,
    UserValidationError,
};
pub use self::validation::{FieldViolation, Violations};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pet_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
