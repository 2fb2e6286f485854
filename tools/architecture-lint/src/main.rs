//! `architecture-lint [BACKEND_DIR]`
//!
//! Checks the backend sources against the layering rules. Without an
//! argument the workspace's own `backend/` directory is linted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let backend = std::env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../backend"),
        PathBuf::from,
    );

    match architecture_lint::lint_backend(&backend) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = write!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
