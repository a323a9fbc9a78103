//! Tag store: named string values substituted into skeleton templates.

use std::collections::BTreeMap;

use crate::domain::AppError;

/// Mapping from placeholder name to resolved string value.
///
/// Populated once during tag computation at the start of a run and
/// treated as immutable afterwards; the token engine only reads it.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    values: BTreeMap<String, String>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a tag value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a tag value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a tag value that the caller itself is responsible for
    /// having computed earlier in the run.
    pub fn require(&self, key: &str) -> Result<&str, AppError> {
        self.get(key)
            .ok_or_else(|| AppError::invalid_input(format!("tag '{key}' was never computed")))
    }

    /// Snapshot of all tags in key order.
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}
