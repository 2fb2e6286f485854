//! Query composer for pet listings.
//!
//! One [`PetFilter`] describes the free-text and species predicates. The same
//! filter value drives the page query, the query-scoped count and, with the
//! species dropped, the per-species facet counts, so displayed totals can
//! never drift from the listed items.

use pagination::{PageNumber, PagePlacement, PageSize, PageWindow};

use super::ports::{PetRepository, PetRepositoryError};
use super::{Pet, Species};

/// Fixed number of pets shown per page.
pub const PET_PAGE_SIZE: PageSize = match PageSize::new(6) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Pet fields examined by free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Breed,
    OwnerName,
}

impl SearchField {
    /// Every searchable field; a term matches when any of them contains it.
    pub const ALL: [Self; 3] = [Self::Name, Self::Breed, Self::OwnerName];

    fn value(self, pet: &Pet) -> &str {
        match self {
            Self::Name => pet.draft.name.as_ref(),
            Self::Breed => pet.draft.breed.as_ref(),
            Self::OwnerName => pet.draft.owner_name.as_ref(),
        }
    }
}

/// Trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for blank input, which matches every pet.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// The trimmed term as typed.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive substring test.
    pub fn is_contained_in(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// Combined listing predicate: text AND species.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetFilter {
    pub term: Option<SearchTerm>,
    pub species: Option<Species>,
}

impl PetFilter {
    /// Combine an optional search term with an optional species.
    pub fn new(term: Option<SearchTerm>, species: Option<Species>) -> Self {
        Self { term, species }
    }

    /// The same text predicate restricted to one species.
    pub fn for_species(&self, species: Species) -> Self {
        Self {
            term: self.term.clone(),
            species: Some(species),
        }
    }

    /// Reference semantics every store must reproduce.
    pub fn matches(&self, pet: &Pet) -> bool {
        let text_matches = self.term.as_ref().is_none_or(|term| {
            SearchField::ALL
                .iter()
                .any(|field| term.is_contained_in(field.value(pet)))
        });
        let species_matches = self.species.is_none_or(|species| pet.draft.species == species);
        text_matches && species_matches
    }
}

/// Counts of pets matching the text predicate, split by species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeciesFacets {
    pub dogs: u64,
    pub cats: u64,
}

impl SpeciesFacets {
    /// All pets matching the text predicate. Species partition it exactly.
    pub fn total(&self) -> u64 {
        self.dogs + self.cats
    }
}

/// A listing request after query-string parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetListingRequest {
    pub filter: PetFilter,
    pub page: PageNumber,
}

/// One rendered page of pets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetListing {
    pub items: Vec<Pet>,
    pub window: PageWindow,
    pub facets: SpeciesFacets,
}

/// Result of composing a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    Page(PetListing),
    /// The requested page is past the end; render `page` instead, keeping
    /// the same filter.
    Redirect { filter: PetFilter, page: PageNumber },
}

/// Run the page query, the query-scoped count and both facet counts
/// concurrently, then resolve the requested page.
pub async fn compose_listing<R>(
    repository: &R,
    request: PetListingRequest,
) -> Result<ListingOutcome, PetRepositoryError>
where
    R: PetRepository + ?Sized,
{
    let PetListingRequest { filter, page } = request;
    let probe = PageWindow::new(page, PET_PAGE_SIZE, 0);
    let dog_filter = filter.for_species(Species::Dog);
    let cat_filter = filter.for_species(Species::Cat);

    let (items, query_total, dogs, cats) = tokio::try_join!(
        repository.list(&filter, probe.offset(), probe.limit()),
        repository.count(&filter),
        repository.count(&dog_filter),
        repository.count(&cat_filter),
    )?;

    let window = PageWindow::new(page, PET_PAGE_SIZE, query_total);
    match window.placement() {
        PagePlacement::Beyond { last } => Ok(ListingOutcome::Redirect { filter, page: last }),
        PagePlacement::InRange => Ok(ListingOutcome::Page(PetListing {
            items,
            window,
            facets: SpeciesFacets { dogs, cats },
        })),
    }
}

#[cfg(test)]
mod tests;
