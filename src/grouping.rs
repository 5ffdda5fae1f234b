//! Grouping of discovered tests into containers
//!
//! Each group gets its own independent shuffle, so the grouping decides what
//! "at most N tests" is counted against: per module/class (`container`) or
//! across the whole suite (`global`).

use crate::error::{AppError, AppResult};
use crate::model::{GroupKey, TestIdentifier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Key used for every test under [`GroupingStrategy::Global`]
pub const GLOBAL_GROUP: &str = "<all>";

/// How a test identifier maps to its group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum GroupingStrategy {
    /// Group by the path before the last `separator`: `a::b::test_x` → `a::b`
    Container {
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// A single group holding every test
    Global,
}

pub(crate) fn default_separator() -> String {
    "::".to_string()
}

impl Default for GroupingStrategy {
    fn default() -> Self {
        Self::Container {
            separator: default_separator(),
        }
    }
}

impl GroupingStrategy {
    /// Map an identifier to its group key
    ///
    /// # Errors
    /// Returns `AppError::UngroupableIdentifier` when the identifier has no
    /// container under this strategy.
    pub fn group_key(&self, id: &TestIdentifier) -> AppResult<GroupKey> {
        match self {
            Self::Global => Ok(GroupKey::from(GLOBAL_GROUP)),
            Self::Container { separator } => {
                let raw = id.as_str();
                let Some((container, name)) = raw.rsplit_once(separator.as_str()) else {
                    return Err(AppError::UngroupableIdentifier {
                        id: raw.to_string(),
                        reason: format!("missing separator '{}'", separator),
                    });
                };
                if container.is_empty() {
                    return Err(AppError::UngroupableIdentifier {
                        id: raw.to_string(),
                        reason: "empty container".to_string(),
                    });
                }
                if name.is_empty() {
                    return Err(AppError::UngroupableIdentifier {
                        id: raw.to_string(),
                        reason: "empty test name".to_string(),
                    });
                }
                Ok(GroupKey::from(container))
            }
        }
    }

    /// Partition a discovered universe into groups
    ///
    /// Within each group, identifiers keep their discovery order. The shuffle
    /// is only reproducible if the host discovers tests in a stable order.
    ///
    /// # Errors
    /// Fails on the first identifier that cannot be grouped or that appears
    /// twice. Nothing is silently dropped.
    pub fn partition<I>(&self, universe: I) -> AppResult<Groups>
    where
        I: IntoIterator<Item = TestIdentifier>,
    {
        let mut groups: BTreeMap<GroupKey, Vec<TestIdentifier>> = BTreeMap::new();
        let mut seen = HashSet::new();
        let mut total = 0usize;

        for id in universe {
            let key = self.group_key(&id)?;
            if !seen.insert(id.clone()) {
                return Err(AppError::DuplicateIdentifier {
                    id: id.as_str().to_string(),
                });
            }
            groups.entry(key).or_default().push(id);
            total += 1;
        }

        tracing::debug!(
            total_tests = total,
            group_count = groups.len(),
            "Partitioned discovered tests into groups"
        );

        Ok(Groups { groups, total })
    }
}

/// Discovered tests grouped by container
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: BTreeMap<GroupKey, Vec<TestIdentifier>>,
    total: usize,
}

impl Groups {
    /// Iterate groups in key order, members in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[TestIdentifier])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[TestIdentifier]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Total number of discovered tests across all groups
    pub fn total_tests(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
