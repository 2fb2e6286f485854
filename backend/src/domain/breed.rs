//! Breed suggestions.
//!
//! Breeds only feed autocomplete. A pet's breed is free text and is never
//! checked against this catalogue.

use super::{PetText, Species};

/// A suggested breed; `(name, species)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Breed {
    pub name: PetText,
    pub species: Species,
}

impl Breed {
    pub fn new(name: PetText, species: Species) -> Self {
        Self { name, species }
    }
}

/// Sort breed names the way suggestion lists present them.
///
/// Names compare case-insensitively, falling back to the raw text so the
/// order is total.
pub fn sort_breed_names(names: &mut [String]) {
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}
