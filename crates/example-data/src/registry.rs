//! Seed registry loading and validation.
//!
//! The registry is a versioned JSON document. A copy ships inside the crate
//! (see [`SeedRegistry::bundled`]) and deployments may point at their own
//! file instead.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{AccountSeed, PetSeed, SpeciesSeed};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_REGISTRY: &str = include_str!("../data/registry.json");

/// Validated seed registry.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, SpeciesSeed};
///
/// let json = r#"{
///     "version": 1,
///     "breeds": {"DOG": ["Beagle"], "CAT": ["Persa"]},
///     "account": {"name": "Ada", "email": "ada@example.com", "password": "secret1"},
///     "pets": []
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.breeds(SpeciesSeed::Cat), ["Persa".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    dog_breeds: Vec<String>,
    cat_breeds: Vec<String>,
    account: AccountSeed,
    pets: Vec<PetSeed>,
}

impl SeedRegistry {
    /// Loads the registry compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled document fails validation.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_REGISTRY)
    }

    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - A breed is blank or repeated within its species
    /// - The account or a sample pet has a blank field
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let dog_breeds = validate_breeds(SpeciesSeed::Dog, raw.breeds.dog)?;
        let cat_breeds = validate_breeds(SpeciesSeed::Cat, raw.breeds.cat)?;
        validate_account(&raw.account)?;
        for (index, pet) in raw.pets.iter().enumerate() {
            validate_pet(index, pet)?;
        }

        Ok(Self {
            version: raw.version,
            dog_breeds,
            cat_breeds,
            account: raw.account,
            pets: raw.pets,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the breed catalogue for one species, in file order.
    #[must_use]
    pub fn breeds(&self, species: SpeciesSeed) -> &[String] {
        match species {
            SpeciesSeed::Dog => &self.dog_breeds,
            SpeciesSeed::Cat => &self.cat_breeds,
        }
    }

    /// Returns the default account.
    #[must_use]
    pub const fn account(&self) -> &AccountSeed {
        &self.account
    }

    /// Returns the sample pets owned by the default account.
    #[must_use]
    pub fn pets(&self) -> &[PetSeed] {
        &self.pets
    }
}

fn validate_breeds(species: SpeciesSeed, names: Vec<String>) -> Result<Vec<String>, RegistryError> {
    let mut seen = HashSet::new();
    let mut breeds = Vec::with_capacity(names.len());
    for (index, name) in names.into_iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::BlankBreed {
                species: species.label().to_owned(),
                index,
            });
        }
        if !seen.insert(trimmed.to_owned()) {
            return Err(RegistryError::DuplicateBreed {
                species: species.label().to_owned(),
                name: trimmed.to_owned(),
            });
        }
        breeds.push(trimmed.to_owned());
    }
    Ok(breeds)
}

fn validate_account(account: &AccountSeed) -> Result<(), RegistryError> {
    let fields = [
        ("name", account.name.as_str()),
        ("email", account.email.as_str()),
        ("password", account.password.as_str()),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(RegistryError::IncompleteAccount { field: *field }),
        None => Ok(()),
    }
}

fn validate_pet(index: usize, pet: &PetSeed) -> Result<(), RegistryError> {
    let fields = [
        ("name", pet.name.as_str()),
        ("breed", pet.breed.as_str()),
        ("ownerName", pet.owner_name.as_str()),
        ("ownerContact", pet.owner_contact.as_str()),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(RegistryError::IncompletePet {
            index,
            field: *field,
        }),
        None => Ok(()),
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    breeds: RawBreeds,
    account: AccountSeed,
    #[serde(default)]
    pets: Vec<PetSeed>,
}

#[derive(Debug, Deserialize)]
struct RawBreeds {
    #[serde(rename = "DOG", default)]
    dog: Vec<String>,
    #[serde(rename = "CAT", default)]
    cat: Vec<String>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn bundled_registry_is_valid() {
        let registry = SeedRegistry::bundled().expect("bundled registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.breeds(SpeciesSeed::Dog).len(), 13);
        assert_eq!(registry.breeds(SpeciesSeed::Cat).len(), 8);
        assert_eq!(registry.pets().len(), 6);
        assert_eq!(registry.account().name, "Vitor Admin");
    }

    #[test]
    fn breeds_are_trimmed() {
        let json = r#"{
            "version": 1,
            "breeds": {"DOG": ["  Pug "]},
            "account": {"name": "Ada", "email": "ada@example.com", "password": "secret1"}
        }"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");
        assert_eq!(registry.breeds(SpeciesSeed::Dog), ["Pug".to_owned()]);
        assert!(registry.breeds(SpeciesSeed::Cat).is_empty());
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 7, "breeds": {}, "account": {"name": "a", "email": "a@b.c", "password": "x"}}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 7 }
    )]
    #[case::blank_breed(
        r#"{"version": 1, "breeds": {"CAT": ["Persa", " "]}, "account": {"name": "a", "email": "a@b.c", "password": "x"}}"#,
        RegistryError::BlankBreed { species: "CAT".to_owned(), index: 1 }
    )]
    #[case::duplicate_breed(
        r#"{"version": 1, "breeds": {"DOG": ["Pug", "Pug"]}, "account": {"name": "a", "email": "a@b.c", "password": "x"}}"#,
        RegistryError::DuplicateBreed { species: "DOG".to_owned(), name: "Pug".to_owned() }
    )]
    #[case::blank_account_email(
        r#"{"version": 1, "breeds": {}, "account": {"name": "a", "email": "", "password": "x"}}"#,
        RegistryError::IncompleteAccount { field: "email" }
    )]
    #[case::blank_pet_owner(
        r#"{"version": 1, "breeds": {}, "account": {"name": "a", "email": "a@b.c", "password": "x"},
            "pets": [{"name": "Rex", "age": 1, "species": "DOG", "breed": "Pug", "ownerName": " ", "ownerContact": "1"}]}"#,
        RegistryError::IncompletePet { index: 0, field: "ownerName" }
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        assert_eq!(SeedRegistry::from_json(json), Err(expected));
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_account(r#"{"version": 1, "breeds": {}}"#)]
    #[case::unknown_species(
        r#"{"version": 1, "breeds": {}, "account": {"name": "a", "email": "a@b.c", "password": "x"},
            "pets": [{"name": "Rex", "age": 1, "species": "BIRD", "breed": "x", "ownerName": "y", "ownerContact": "1"}]}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }
}
