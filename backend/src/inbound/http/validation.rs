//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query parameters are parsed here so handlers hand typed values
//! to the domain. Failures use the same `details.fields[]` envelope as
//! domain validation.

use pagination::PageNumber;

use crate::domain::{Error, FieldViolation, PetId, Species, Violations};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidPage,
    InvalidSpecies,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidSpecies => "invalid_species",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    let mut violations = Violations::new();
    violations.push(FieldViolation::new(field.0, code.as_str(), message));
    Error::from(violations)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    field_error(
        field,
        ErrorCode::InvalidUuid,
        format!("{} must be a valid UUID, got '{value}'", field.0),
    )
}

pub(crate) fn parse_pet_id(value: &str, field: FieldName) -> Result<PetId, Error> {
    value
        .parse::<PetId>()
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional page parameter; absent or blank means the first page.
pub(crate) fn parse_page(value: Option<&str>, field: FieldName) -> Result<PageNumber, Error> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(PageNumber::FIRST),
        Some(raw) => raw
            .parse::<PageNumber>()
            .map_err(|err| field_error(field, ErrorCode::InvalidPage, err.to_string())),
    }
}

/// Parse a species filter. Absent, blank and `ALL` mean "no filter".
pub(crate) fn parse_species_filter(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Species>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) if raw.eq_ignore_ascii_case("ALL") => Ok(None),
        Some(raw) => raw
            .parse::<Species>()
            .map(Some)
            .map_err(|err| field_error(field, ErrorCode::InvalidSpecies, err.to_string())),
    }
}
