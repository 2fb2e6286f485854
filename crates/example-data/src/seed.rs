//! Seed record types.
//!
//! These mirror the backend's pet and account shapes without depending on
//! them.

use serde::{Deserialize, Serialize};

/// Species of a seeded pet or breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpeciesSeed {
    /// Dogs.
    #[serde(rename = "DOG")]
    Dog,
    /// Cats.
    #[serde(rename = "CAT")]
    Cat,
}

impl SpeciesSeed {
    /// Wire label used by the registry file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
        }
    }
}

/// The default account created on a fresh deployment.
///
/// # Example
///
/// ```
/// use example_data::AccountSeed;
///
/// let account = AccountSeed {
///     name: "Ada".to_owned(),
///     email: "ada@example.com".to_owned(),
///     password: "secret1".to_owned(),
/// };
/// assert_eq!(account.name, "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSeed {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password, hashed by the backend before storage.
    pub password: String,
}

/// A sample pet owned by the default account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSeed {
    /// Pet name.
    pub name: String,
    /// Age in whole years.
    pub age: u8,
    /// Species.
    pub species: SpeciesSeed,
    /// Free-text breed.
    pub breed: String,
    /// Name of the real-world caretaker.
    pub owner_name: String,
    /// Contact details of the real-world caretaker.
    pub owner_contact: String,
    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
