//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A breed entry is blank.
    #[error("blank breed name at index {index} of the {species} catalogue")]
    BlankBreed {
        /// Species catalogue containing the entry.
        species: String,
        /// Index of the blank entry.
        index: usize,
    },

    /// The same breed appears twice for one species.
    #[error("duplicate breed '{name}' in the {species} catalogue")]
    DuplicateBreed {
        /// Species catalogue containing the duplicate.
        species: String,
        /// The repeated breed name.
        name: String,
    },

    /// The default account is incomplete.
    #[error("default account field '{field}' must not be blank")]
    IncompleteAccount {
        /// Name of the blank field.
        field: &'static str,
    },

    /// A sample pet has a blank required field.
    #[error("sample pet at index {index} has a blank '{field}'")]
    IncompletePet {
        /// Index of the pet in the registry.
        index: usize,
        /// Name of the blank field.
        field: &'static str,
    },
}
