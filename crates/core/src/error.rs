//! Field-level validation error model.
//!
//! Schema validation reports one human-readable message per field path. Rules
//! are evaluated top-to-bottom and short-circuit per field: the first violated
//! rule for a field is the one that sticks.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Result type used by schema validation.
pub type ValidationResult<T> = Result<T, FieldErrors>;

/// A mapping from field path to a single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`. Later violations for the same field are
    /// ignored (first rule wins).
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        if let Entry::Vacant(slot) = self.errors.entry(field.into()) {
            slot.insert(message.into());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Turn the accumulated violations into a `ValidationResult`, passing
    /// `value` through when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> ValidationResult<T> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
