//! Type-safe test identifier and group key wrappers
//!
//! Both are opaque string tokens supplied by the host. Keeping them as distinct
//! newtypes prevents a group key from being looked up where a test is expected.

use serde::Serialize;
use std::fmt;

/// One runnable test case as discovered by the host
///
/// The wrapped string must be unique within a discovered universe; the
/// grouping step rejects duplicates.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TestIdentifier(String);

impl TestIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TestIdentifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TestIdentifier {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The container a test belongs to (e.g. its module or class)
///
/// Ordering is plain lexicographic string ordering, so iteration over groups
/// is identical on every run for the same discovery input.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}
