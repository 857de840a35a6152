//! Field-level validation.
//!
//! # Responsibilities
//! - Describe a single rejected field (`FieldError`)
//! - Let request models declare constraints beyond what serde enforces
//!
//! # Design Decisions
//! - Validation collects every failing field, not just the first
//! - Error shape follows `{"loc": [...], "msg": ..., "type": ...}` so clients
//!   can point at the offending parameter

use serde::Serialize;

/// A single rejected input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the value came from, e.g. `["query", "limit"]`.
    pub loc: Vec<String>,
    /// Human readable reason.
    pub msg: String,
    /// Machine readable error kind.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new<L, S>(loc: L, msg: impl Into<String>, kind: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// A query parameter that is not declared by the model.
    pub fn extra_forbidden(field: &str) -> Self {
        Self::new(["query", field], "Extra inputs are not permitted", "extra_forbidden")
    }

    /// A query parameter that could not be parsed as an integer.
    pub fn int_parsing(field: &str) -> Self {
        Self::new(
            ["query", field],
            "Input should be a valid integer, unable to parse string as an integer",
            "int_parsing",
        )
    }
}

/// Semantic constraints checked after deserialization.
///
/// The default implementation accepts everything, so plain models only need
/// an empty `impl Validate for T {}`.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Ok(())
    }
}

/// Collects field errors and turns them into a validation result.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Records an error for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, error: impl FnOnce() -> FieldError) {
        if !ok {
            self.0.push(error());
        }
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}
