//! Behaviour of the in-process record store.

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::fixtures::{account, fixture_timestamp, pet_fields, pet_owned_by};
use crate::domain::{PetDraft, PetFields, PetText, SearchTerm};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

fn pet_at(owner: &UserId, name: &str, species: &str, minutes: i64) -> Pet {
    let draft = PetDraft::try_from_fields(PetFields {
        species,
        ..pet_fields(name)
    })
    .expect("valid pet");
    Pet::register(
        owner.clone(),
        draft,
        fixture_timestamp() + Duration::minutes(minutes),
    )
}

fn names(pets: &[Pet]) -> Vec<&str> {
    pets.iter().map(|pet| pet.draft.name.as_ref()).collect()
}

#[rstest]
#[tokio::test]
async fn list_orders_newest_first_and_pages(store: MemoryStore) {
    let owner = UserId::random();
    for (minutes, name) in [(0, "Bento"), (1, "Luna"), (2, "Thor")] {
        PetRepository::create(&store, &pet_at(&owner, name, "DOG", minutes))
            .await
            .expect("create");
    }
    let filter = PetFilter::default();

    let first = PetRepository::list(&store, &filter, 0, 2).await.expect("first page");
    let second = PetRepository::list(&store, &filter, 2, 2).await.expect("second page");

    assert_eq!(names(&first), ["Thor", "Luna"]);
    assert_eq!(names(&second), ["Bento"]);
}

#[rstest]
#[tokio::test]
async fn count_applies_term_and_species(store: MemoryStore) {
    let owner = UserId::random();
    PetRepository::create(&store, &pet_at(&owner, "Rex", "DOG", 0))
        .await
        .expect("create");
    PetRepository::create(&store, &pet_at(&owner, "Rexinha", "CAT", 1))
        .await
        .expect("create");
    PetRepository::create(&store, &pet_at(&owner, "Luna", "CAT", 2))
        .await
        .expect("create");
    let term = SearchTerm::parse("REX");

    let all = store
        .count(&PetFilter::new(term.clone(), None))
        .await
        .expect("count");
    let cats = store
        .count(&PetFilter::new(term, Some(Species::Cat)))
        .await
        .expect("count");

    assert_eq!((all, cats), (2, 1));
}

#[rstest]
#[tokio::test]
async fn update_of_vanished_pet_reports_false(store: MemoryStore) {
    let pet = pet_owned_by(&UserId::random(), "Ghost");
    assert!(!PetRepository::update(&store, &pet).await.expect("update"));
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_rejected_on_create_and_update(store: MemoryStore) {
    let ada = account("Ada", "ada@example.com", "secret1");
    let grace = account("Grace", "grace@example.com", "secret1");
    UserRepository::create(&store, &ada).await.expect("ada");
    UserRepository::create(&store, &grace).await.expect("grace");

    let clone = account("Other Ada", "ada@example.com", "secret1");
    let created = UserRepository::create(&store, &clone).await;
    let mut renamed = grace.clone();
    renamed.user = crate::domain::User::new(
        grace.id().clone(),
        grace.user.name().clone(),
        ada.user.email().clone(),
    );
    let updated = UserRepository::update(&store, &renamed).await;

    assert!(matches!(created, Err(UserPersistenceError::DuplicateEmail { .. })));
    assert!(matches!(updated, Err(UserPersistenceError::DuplicateEmail { .. })));
}

#[rstest]
#[tokio::test]
async fn deleting_user_cascades_to_their_pets(store: MemoryStore) {
    let owner = account("Ada", "ada@example.com", "secret1");
    let bystander = UserId::random();
    UserRepository::create(&store, &owner).await.expect("owner");
    PetRepository::create(&store, &pet_owned_by(owner.id(), "Rex"))
        .await
        .expect("pet");
    PetRepository::create(&store, &pet_owned_by(&bystander, "Mel"))
        .await
        .expect("pet");

    assert!(UserRepository::delete(&store, owner.id()).await.expect("delete"));
    let remaining = PetRepository::list(&store, &PetFilter::default(), 0, 10)
        .await
        .expect("list");

    assert_eq!(names(&remaining), ["Mel"]);
}

#[rstest]
#[tokio::test]
async fn seed_upsert_is_idempotent(store: MemoryStore) {
    let owner = UserId::random();
    store
        .upsert_seed(&pet_at(&owner, "Bento", "DOG", 0))
        .await
        .expect("first");
    store
        .upsert_seed(&pet_at(&owner, "Bento", "DOG", 5))
        .await
        .expect("second");

    let total = store.count(&PetFilter::default()).await.expect("count");
    assert_eq!(total, 1);
}

#[rstest]
#[tokio::test]
async fn breeds_upsert_once_per_species(store: MemoryStore) {
    let srd = |species| Breed::new(PetText::new("SRD").expect("name"), species);
    for breed in [srd(Species::Dog), srd(Species::Dog), srd(Species::Cat)] {
        store.upsert(&breed).await.expect("upsert");
    }

    let all = BreedRepository::list(&store, None).await.expect("all");
    let cats = BreedRepository::list(&store, Some(Species::Cat))
        .await
        .expect("cats");

    assert_eq!(all.len(), 2);
    assert_eq!(cats, [srd(Species::Cat)]);
}
