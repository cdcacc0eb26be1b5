//! Subject name lookup for context labels.
//!
//! Listing records reference subjects by id. Turning an id into a display
//! name is an I/O boundary in production (the subjects API), so the seam is
//! async and fallible. [`StaticSubjects`] serves names from the `[subjects]`
//! config table.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectLookupError {
    #[error("Subject not found: {0}")]
    NotFound(String),
    #[error("Subject lookup for '{id}' failed: {reason}")]
    Unavailable { id: String, reason: String },
}

/// Resolves a subject id to its display name.
#[async_trait]
pub trait SubjectLookup: Send + Sync {
    async fn subject_name(&self, id: &str) -> Result<String, SubjectLookupError>;
}

/// Lookup backed by a fixed id → name table.
#[derive(Debug, Clone, Default)]
pub struct StaticSubjects {
    names: BTreeMap<String, String>,
}

impl StaticSubjects {
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }
}

#[async_trait]
impl SubjectLookup for StaticSubjects {
    async fn subject_name(&self, id: &str) -> Result<String, SubjectLookupError> {
        self.names
            .get(id)
            .cloned()
            .ok_or_else(|| SubjectLookupError::NotFound(id.to_string()))
    }
}
