//! Pet records and the validation applied to client-supplied pet fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use super::validation::{FieldViolation, Violations};

/// Stable pet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(Uuid);

impl PetId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Species a pet or breed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    #[serde(rename = "DOG")]
    Dog,
    #[serde(rename = "CAT")]
    Cat,
}

impl Species {
    /// Every species, in facet display order.
    pub const ALL: [Self; 2] = [Self::Dog, Self::Cat];

    /// Canonical upper-case label used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a species label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("species must be DOG or CAT, got '{0}'")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    /// Parse a species label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("DOG") {
            Ok(Self::Dog)
        } else if trimmed.eq_ignore_ascii_case("CAT") {
            Ok(Self::Cat)
        } else {
            Err(UnknownSpecies(s.to_owned()))
        }
    }
}

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetAge(u8);

/// Validation errors for [`PetAge`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetAgeError {
    #[error("age is required")]
    Missing,
    #[error("age must be a whole number")]
    NotANumber,
    #[error("age must be greater than or equal to 0")]
    Negative,
    #[error("age must be at most {max}")]
    TooLarge { max: u8 },
}

impl PetAge {
    pub const fn new(years: u8) -> Self {
        Self(years)
    }

    pub const fn years(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for PetAge {
    type Error = PetAgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(PetAgeError::Negative);
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| PetAgeError::TooLarge { max: u8::MAX })
    }
}

impl FromStr for PetAge {
    type Err = PetAgeError;

    /// Coerce a textual age such as `"3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PetAgeError::Missing);
        }
        let value: i64 = trimmed.parse().map_err(|_| PetAgeError::NotANumber)?;
        Self::try_from(value)
    }
}

/// Age as supplied by a client, before coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAge<'a> {
    Missing,
    Number(i64),
    Text(&'a str),
}

impl RawAge<'_> {
    fn parse(self) -> Result<PetAge, PetAgeError> {
        match self {
            Self::Missing => Err(PetAgeError::Missing),
            Self::Number(value) => PetAge::try_from(value),
            Self::Text(text) => text.parse(),
        }
    }
}

/// Maximum length of a free-text pet field.
pub const PET_TEXT_MAX: usize = 200;

/// Trimmed, non-empty free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetText(String);

/// Validation errors for [`PetText`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetTextError {
    #[error("value is required")]
    Empty,
    #[error("value must be at most {max} characters")]
    TooLong { max: usize },
}

impl PetText {
    pub fn new(value: impl AsRef<str>) -> Result<Self, PetTextError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PetTextError::Empty);
        }
        if trimmed.chars().count() > PET_TEXT_MAX {
            return Err(PetTextError::TooLong { max: PET_TEXT_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PetText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PetText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PetText> for String {
    fn from(value: PetText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PetText {
    type Error = PetTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unvalidated pet fields as received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetFields<'a> {
    pub name: &'a str,
    pub age: RawAge<'a>,
    pub species: &'a str,
    pub breed: &'a str,
    pub owner_name: &'a str,
    pub owner_contact: &'a str,
    pub image: Option<&'a str>,
}

/// The client-controlled part of a pet: everything except identity,
/// ownership and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    pub name: PetText,
    pub age: PetAge,
    pub species: Species,
    pub breed: PetText,
    pub owner_name: PetText,
    pub owner_contact: PetText,
    pub image: Option<String>,
}

impl PetDraft {
    /// Validate every field, collecting all failures.
    ///
    /// Blank images count as absent.
    ///
    /// # Examples
    /// ```
    /// use pet_registry::domain::{PetDraft, PetFields, RawAge, Species};
    ///
    /// let draft = PetDraft::try_from_fields(PetFields {
    ///     name: "Rex",
    ///     age: RawAge::Text("3"),
    ///     species: "dog",
    ///     breed: "Beagle",
    ///     owner_name: "Ana",
    ///     owner_contact: "21 99999-0000",
    ///     image: Some(" "),
    /// })
    /// .expect("valid pet");
    /// assert_eq!(draft.species, Species::Dog);
    /// assert_eq!(draft.age.years(), 3);
    /// assert!(draft.image.is_none());
    /// ```
    pub fn try_from_fields(fields: PetFields<'_>) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let name = violations.check("name", "invalid_name", PetText::new(fields.name));
        let age = violations.check("age", "invalid_age", fields.age.parse());
        let species = match fields.species.parse::<Species>() {
            Ok(species) => Some(species),
            Err(err) => {
                violations.push(FieldViolation::new("species", "invalid_species", err.to_string()));
                None
            }
        };
        let breed = violations.check("breed", "invalid_breed", PetText::new(fields.breed));
        let owner_name = violations.check(
            "ownerName",
            "invalid_owner_name",
            PetText::new(fields.owner_name),
        );
        let owner_contact = violations.check(
            "ownerContact",
            "invalid_owner_contact",
            PetText::new(fields.owner_contact),
        );
        let image = fields
            .image
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        match (name, age, species, breed, owner_name, owner_contact) {
            (Some(name), Some(age), Some(species), Some(breed), Some(owner_name), Some(owner_contact)) => {
                Ok(Self {
                    name,
                    age,
                    species,
                    breed,
                    owner_name,
                    owner_contact,
                    image,
                })
            }
            _ => Err(violations),
        }
    }
}

/// A stored pet.
///
/// ## Invariants
/// - `owner_user_id` is assigned by the server from the creating identity
///   and never changes.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub owner_user_id: UserId,
    pub draft: PetDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Register a new pet owned by `owner`.
    pub fn register(owner: UserId, draft: PetDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: PetId::random(),
            owner_user_id: owner,
            draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the client-controlled fields, keeping identity and ownership.
    pub fn revise(self, draft: PetDraft, now: DateTime<Utc>) -> Self {
        Self {
            draft,
            updated_at: now.max(self.created_at),
            ..self
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_user_id == user
    }
}
