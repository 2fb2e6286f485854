//! Tests for the listing filter and page composition.

use rstest::rstest;

use super::*;
use crate::domain::fixtures::{pet_fields, pet_owned_by};
use crate::domain::ports::MockPetRepository;
use crate::domain::{PetDraft, PetFields, UserId};

fn pet(name: &str, breed: &str, owner_name: &str, species: &str) -> Pet {
    let mut pet = pet_owned_by(&UserId::random(), name);
    pet.draft = PetDraft::try_from_fields(PetFields {
        breed,
        owner_name,
        species,
        ..pet_fields(name)
    })
    .expect("valid draft");
    pet
}

fn filter(term: &str, species: Option<Species>) -> PetFilter {
    PetFilter::new(SearchTerm::parse(term), species)
}

fn page(value: u32) -> PageNumber {
    PageNumber::new(value).expect("non-zero page")
}

#[rstest]
#[case("", true)]
#[case("rex", true)]
#[case("BEAG", true)]
#[case("ana", true)]
#[case("persa", false)]
#[case("  rex  ", true)]
fn text_predicate_spans_name_breed_and_owner(#[case] term: &str, #[case] expected: bool) {
    let candidate = pet("Rex", "Beagle", "Ana", "DOG");
    assert_eq!(filter(term, None).matches(&candidate), expected);
}

#[rstest]
fn owner_contact_is_not_searched() {
    let candidate = pet("Rex", "Beagle", "Ana", "DOG");
    assert!(!filter("21977665544", None).matches(&candidate));
}

#[rstest]
#[case(None, true)]
#[case(Some(Species::Dog), true)]
#[case(Some(Species::Cat), false)]
fn species_predicate_is_and_combined(#[case] species: Option<Species>, #[case] expected: bool) {
    let candidate = pet("Rex", "Beagle", "Ana", "DOG");
    assert_eq!(filter("rex", species).matches(&candidate), expected);
}

#[rstest]
fn search_is_unicode_case_insensitive() {
    let candidate = pet("Luna", "Siamês", "Ana", "CAT");
    assert!(filter("SIAMÊS", None).matches(&candidate));
}

#[rstest]
fn blank_terms_are_dropped() {
    assert!(SearchTerm::parse("   ").is_none());
    assert_eq!(
        SearchTerm::parse(" Thor ").map(|term| term.as_str().to_owned()),
        Some("Thor".to_owned())
    );
}

#[rstest]
fn for_species_keeps_text_predicate() {
    let base = filter("golden", Some(Species::Cat));
    let dogs = base.for_species(Species::Dog);
    assert_eq!(dogs.term, base.term);
    assert_eq!(dogs.species, Some(Species::Dog));
}

fn counting_repo(query_total: u64, dogs: u64, cats: u64, items: Vec<Pet>) -> MockPetRepository {
    let mut repo = MockPetRepository::new();
    repo.expect_list()
        .withf(|_, offset, limit| *offset % 6 == 0 && *limit == 6)
        .return_once(move |_, _, _| Ok(items));
    repo.expect_count().returning(move |filter| {
        Ok(match filter.species {
            Some(Species::Dog) => dogs,
            Some(Species::Cat) => cats,
            None => query_total,
        })
    });
    repo
}

#[rstest]
#[tokio::test]
async fn facets_ignore_the_selected_species() {
    let repo = counting_repo(7, 4, 3, Vec::new());
    let request = PetListingRequest {
        filter: filter("a", Some(Species::Cat)),
        page: page(1),
    };

    let ListingOutcome::Page(listing) = compose_listing(&repo, request)
        .await
        .expect("listing composed")
    else {
        panic!("expected a page");
    };

    assert_eq!(listing.facets, SpeciesFacets { dogs: 4, cats: 3 });
    assert_eq!(listing.facets.total(), 7);
    assert_eq!(listing.window.total_items(), 3);
    assert_eq!(listing.window.total_pages(), 1);
}

#[rstest]
#[tokio::test]
async fn stale_page_redirects_to_last_page_keeping_filter() {
    // A species-scoped total of 12 means two pages of six.
    let mut repo = MockPetRepository::new();
    repo.expect_list().return_once(|_, _, _| Ok(Vec::new()));
    repo.expect_count().returning(|filter| {
        Ok(match filter.species {
            Some(Species::Dog) => 12,
            Some(Species::Cat) => 5,
            None => 17,
        })
    });
    let requested = filter("e", Some(Species::Dog));
    let request = PetListingRequest {
        filter: requested.clone(),
        page: page(4),
    };

    let outcome = compose_listing(&repo, request).await.expect("composed");

    assert_eq!(
        outcome,
        ListingOutcome::Redirect {
            filter: requested,
            page: page(2),
        }
    );
}

#[rstest]
#[tokio::test]
async fn empty_results_render_a_single_empty_page() {
    let repo = counting_repo(0, 0, 0, Vec::new());
    let request = PetListingRequest {
        filter: filter("nobody", None),
        page: page(9),
    };

    let outcome = compose_listing(&repo, request).await.expect("composed");

    let ListingOutcome::Page(listing) = outcome else {
        panic!("expected a page");
    };
    assert!(listing.items.is_empty());
    assert_eq!(listing.window.total_pages(), 1);
}

#[rstest]
#[tokio::test]
async fn page_offset_follows_requested_page() {
    let mut repo = MockPetRepository::new();
    repo.expect_list()
        .withf(|_, offset, limit| *offset == 12 && *limit == 6)
        .times(1)
        .return_once(|_, _, _| Ok(Vec::new()));
    repo.expect_count().returning(|_| Ok(20));

    let request = PetListingRequest {
        filter: PetFilter::default(),
        page: page(3),
    };
    let outcome = compose_listing(&repo, request).await.expect("composed");

    assert!(matches!(outcome, ListingOutcome::Page(_)));
}
