//! Runs the layering lint over the real backend and over scratch trees.

use std::fs;
use std::path::{Path, PathBuf};

use architecture_lint::{LintError, lint_backend};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn scratch() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for layer in ["domain", "inbound/http", "outbound/memory", "middleware"] {
        fs::create_dir_all(dir.path().join("src").join(layer)).expect("layer dir");
    }
    dir
}

fn put(dir: &TempDir, relative: &str, contents: &str) {
    fs::write(dir.path().join("src").join(relative), contents).expect("write source");
}

#[rstest]
fn the_backend_keeps_its_layers() {
    let backend = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend");
    if let Err(err) = lint_backend(&backend) {
        panic!("{err}");
    }
}

#[rstest]
fn a_layered_tree_passes(scratch: TempDir) {
    put(&scratch, "domain/pet.rs", "pub struct Pet;");
    put(
        &scratch,
        "inbound/http/pets.rs",
        "use crate::domain::Pet; use actix_web::get;",
    );
    put(
        &scratch,
        "outbound/memory/mod.rs",
        "use crate::domain::ports::PetRepository;",
    );
    put(&scratch, "middleware/trace.rs", "use crate::domain::TraceId;");
    assert!(lint_backend(scratch.path()).is_ok());
}

#[rstest]
fn violations_name_every_offending_file(scratch: TempDir) {
    put(&scratch, "domain/pet.rs", "use crate::outbound::memory::MemoryStore;");
    put(
        &scratch,
        "inbound/http/pets.rs",
        "use crate::domain::ports::UserRepository;",
    );
    put(&scratch, "outbound/memory/mod.rs", "use utoipa::ToSchema;");

    let Err(LintError::Violations(violations)) = lint_backend(scratch.path()) else {
        panic!("expected layering violations");
    };
    let files: Vec<PathBuf> = violations.into_iter().map(|violation| violation.file).collect();
    assert_eq!(
        files,
        [
            PathBuf::from("domain/pet.rs"),
            PathBuf::from("inbound/http/pets.rs"),
            PathBuf::from("outbound/memory/mod.rs"),
        ]
    );
}

#[rstest]
fn directories_outside_the_layers_are_skipped(scratch: TempDir) {
    fs::create_dir_all(scratch.path().join("src/server")).expect("server dir");
    put(&scratch, "server/mod.rs", "this is not rust");
    assert!(lint_backend(scratch.path()).is_ok());
}

#[rstest]
fn broken_sources_fail_to_parse(scratch: TempDir) {
    put(&scratch, "domain/broken.rs", "fn broken( {");
    assert!(matches!(
        lint_backend(scratch.path()),
        Err(LintError::Parse { .. })
    ));
}
