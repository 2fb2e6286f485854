//! Field-level validation outcomes shared by domain constructors.
//!
//! Constructors that accept several client-supplied fields collect every
//! failure instead of stopping at the first so adapters can report them all
//! at once.

use std::fmt;

use serde_json::json;

use super::Error;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Client-facing field name (camelCase, as it appears in payloads).
    pub field: &'static str,
    /// Stable machine-readable reason.
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty set of field violations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Record the error of `result` against `field`, returning the value on
    /// success.
    pub fn check<T, E: fmt::Display>(
        &mut self,
        field: &'static str,
        code: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(FieldViolation::new(field, code, err.to_string()));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    /// Fields rejected so far, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|violation| violation.field).collect()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl From<Violations> for Error {
    fn from(value: Violations) -> Self {
        let fields: Vec<_> = value
            .iter()
            .map(|violation| {
                json!({
                    "field": violation.field,
                    "code": violation.code,
                    "message": violation.message,
                })
            })
            .collect();
        Error::invalid_request("validation failed").with_details(json!({
            "code": "validation_failed",
            "fields": fields,
        }))
    }
}
