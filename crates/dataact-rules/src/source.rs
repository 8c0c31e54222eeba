//! Query sources: where a [`RuleDescriptor`](crate::RuleDescriptor)'s
//! query reference is turned into query text.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{RuleError, RuleResult};

/// Resolves query references to query text.
pub trait QuerySource: Send + Sync {
    /// Query text for `reference`, or [`RuleError::QueryNotFound`].
    fn resolve(&self, reference: &str) -> RuleResult<String>;
}

/// Reads `<root>/<reference>` from disk on every call, so edits to query
/// files are picked up without rebuilding the checker.
#[derive(Debug, Clone)]
pub struct DirectoryQuerySource {
    root: PathBuf,
}

impl DirectoryQuerySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a reference resolves to.
    pub fn path_of(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

impl QuerySource for DirectoryQuerySource {
    fn resolve(&self, reference: &str) -> RuleResult<String> {
        let path = self.path_of(reference);
        if !path.is_file() {
            return Err(RuleError::QueryNotFound {
                location: path.display().to_string(),
            });
        }
        std::fs::read_to_string(&path).map_err(|e| RuleError::Io { path, source: e })
    }
}

/// Query text held in memory, keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuerySource {
    queries: BTreeMap<String, String>,
}

impl InMemoryQuerySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(reference, text);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, text: impl Into<String>) {
        self.queries.insert(reference.into(), text.into());
    }
}

impl QuerySource for InMemoryQuerySource {
    fn resolve(&self, reference: &str) -> RuleResult<String> {
        self.queries
            .get(reference)
            .cloned()
            .ok_or_else(|| RuleError::QueryNotFound {
                location: reference.to_string(),
            })
    }
}
