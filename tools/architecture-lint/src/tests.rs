//! Rule-level tests for the layering lint.

use rstest::rstest;

use super::*;

fn check(file: &str, contents: &str) -> Result<(), LintError> {
    lint(&[SourceFile::new(file, contents)], RULES)
}

fn messages(result: Result<(), LintError>) -> Vec<String> {
    match result {
        Err(LintError::Violations(violations)) => violations
            .into_iter()
            .map(|violation| violation.message)
            .collect(),
        other => panic!("expected violations, got {other:?}"),
    }
}

#[rstest]
#[case("domain/user.rs", "use crate::outbound::memory::MemoryStore;")]
#[case("domain/user.rs", "use super::super::inbound::http;")]
#[case("domain/user.rs", "use utoipa::ToSchema;")]
#[case("domain/auth.rs", "fn hash() { let _ = argon2::Argon2::default(); }")]
#[case("domain/pet.rs", "use diesel_async::RunQueryDsl;")]
#[case("inbound/http/users.rs", "use crate::outbound::persistence::DbPool;")]
#[case("inbound/http/users.rs", "use pet_registry::outbound::memory::MemoryStore;")]
#[case("inbound/http/pets.rs", "use diesel::prelude::*;")]
#[case("inbound/http/state.rs", "pub struct S(std::sync::Arc<dyn crate::domain::ports::PetRepository>);")]
#[case("outbound/memory/mod.rs", "use actix_session::Session;")]
#[case("outbound/persistence/pool.rs", "use crate::middleware::Trace;")]
#[case("middleware/trace.rs", "use crate::outbound::memory::MemoryStore;")]
fn forbidden_dependencies_are_reported(#[case] file: &str, #[case] contents: &str) {
    assert_eq!(messages(check(file, contents)).len(), 1);
}

#[rstest]
#[case("domain/pet.rs", "use super::ports::PetRepository; use chrono::Utc;")]
#[case("domain/pet_search.rs", "use super::ports::PetRepository; async fn f() { tokio::try_join!(a(), b()); }")]
#[case("inbound/http/pets.rs", "use crate::domain::ports::PetsQuery; use actix_web::get;")]
#[case("outbound/persistence/diesel_pet_repository.rs", "use crate::domain::ports::PetRepository; use diesel::prelude::*;")]
#[case("outbound/security/argon2_hasher.rs", "use argon2::Argon2;")]
#[case("middleware/trace.rs", "use actix_web::dev::Service; use crate::domain::TraceId;")]
fn permitted_dependencies_pass(#[case] file: &str, #[case] contents: &str) {
    assert!(check(file, contents).is_ok());
}

#[rstest]
fn guard_decides_without_ports() {
    let found = messages(check(
        "domain/authorization.rs",
        "use crate::domain::ports::PetRepository;",
    ));
    assert_eq!(found.len(), 1);
    assert!(found[0].contains("crate::ports"), "{found:?}");
}

#[rstest]
fn guard_stays_synchronous() {
    let found = messages(check(
        "domain/authorization.rs",
        "async fn wait() { tokio::task::yield_now().await; }",
    ));
    assert!(found[0].contains("`tokio`"), "{found:?}");
}

#[rstest]
#[case("UserRepository")]
#[case("BreedRepository")]
#[case("PasswordHasher")]
fn composer_reads_only_pets(#[case] port: &str) {
    let source = format!("use super::ports::{{PetRepository, {port}}};");
    let found = messages(check("domain/pet_search.rs", &source));
    assert_eq!(found.len(), 1);
    assert!(found[0].contains(port));
}

#[rstest]
fn the_same_import_elsewhere_in_the_domain_is_fine() {
    let source = "use super::ports::{UserRepository, PasswordHasher};";
    assert!(check("domain/profile_service.rs", source).is_ok());
}

#[rstest]
fn inline_test_modules_may_name_driven_ports() {
    let source = "
        pub fn handler() {}
        #[cfg(test)]
        mod tests {
            use crate::domain::ports::BreedRepository;
        }
    ";
    assert!(check("inbound/http/breeds.rs", source).is_ok());
}

#[rstest]
#[case("inbound/http/pets/tests.rs")]
#[case("inbound/http/test_utils.rs")]
fn test_files_may_name_driven_ports(#[case] file: &str) {
    assert!(check(file, "use crate::domain::ports::UserRepository;").is_ok());
}

#[rstest]
fn test_modules_still_respect_layers() {
    let source = "
        #[cfg(test)]
        mod tests {
            use crate::outbound::memory::MemoryStore;
        }
    ";
    assert_eq!(messages(check("domain/pet.rs", source)).len(), 1);
}

#[rstest]
fn files_outside_the_rule_scopes_are_ignored() {
    assert!(check("server/mod.rs", "use crate::outbound::memory::MemoryStore;").is_ok());
}

#[rstest]
fn unparsable_sources_are_errors() {
    assert!(matches!(
        check("domain/broken.rs", "fn broken( {"),
        Err(LintError::Parse { .. })
    ));
}
