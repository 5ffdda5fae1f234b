//! Inclusion predicate handed to the test host
//!
//! A filter starts unresolved (grouping strategy plus raw seed and limit
//! settings). [`RandomTestFilter::resolve`] consumes it together with the full
//! discovered universe and produces a [`ResolvedFilter`], which only answers
//! queries. There is no way back to the unresolved state.

use crate::error::AppResult;
use crate::grouping::GroupingStrategy;
use crate::model::TestIdentifier;
use crate::seed::{Seed, resolve_seed};
use crate::selection::{Limit, SelectionResult, SelectionSummary};

/// Reason attached to tests dropped by the limit
pub const LIMIT_REACHED: &str = "Maximum number of tests reached.";

/// Reason attached to tests that were never part of the discovered universe
pub const NOT_DISCOVERED: &str = "Test was not part of the discovered universe.";

/// Outcome of filtering one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Included,
    Excluded { reason: String },
}

impl Decision {
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Included)
    }
}

/// Host-facing filter seam
///
/// Implementations must answer the same way for the same identifier for the
/// whole run, from any thread.
pub trait TestFilter: Send + Sync {
    /// Whether the host should run `id`
    fn include(&self, id: &TestIdentifier) -> bool;

    /// Same as [`TestFilter::include`], with a reason for exclusions
    fn decide(&self, id: &TestIdentifier) -> Decision {
        if self.include(id) {
            Decision::Included
        } else {
            Decision::Excluded {
                reason: LIMIT_REACHED.to_string(),
            }
        }
    }
}

/// Unresolved filter: settings only, no selection yet
#[derive(Debug, Clone, Default)]
pub struct RandomTestFilter {
    grouping: GroupingStrategy,
    seed: Option<Seed>,
    limit: Option<i64>,
}

impl RandomTestFilter {
    pub fn new(grouping: GroupingStrategy) -> Self {
        Self {
            grouping,
            seed: None,
            limit: None,
        }
    }

    /// Use an explicit seed instead of generating one
    pub fn with_seed(mut self, seed: Option<Seed>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the raw per-group limit (`None` disables truncation)
    pub fn with_limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    /// Fix seed and limit, group the universe and compute the selection
    ///
    /// # Errors
    /// - `AppError::InvalidLimit` for a negative limit (checked first, before a
    ///   seed is generated)
    /// - `AppError::UngroupableIdentifier` / `AppError::DuplicateIdentifier`
    ///   from grouping
    pub fn resolve<I>(self, universe: I) -> AppResult<ResolvedFilter>
    where
        I: IntoIterator<Item = TestIdentifier>,
    {
        let limit = Limit::resolve(self.limit)?;
        if !limit.is_bounded() {
            tracing::debug!("Random test filter is not active, defaulting to all tests");
        }

        let seed = resolve_seed(self.seed);
        let groups = self.grouping.partition(universe)?;
        let selection = SelectionResult::compute(&groups, seed, limit);

        Ok(ResolvedFilter {
            grouping: self.grouping,
            seed,
            limit,
            selection,
        })
    }
}

/// Resolved filter: seed, limit and selection are fixed for the run
#[derive(Debug, Clone)]
pub struct ResolvedFilter {
    grouping: GroupingStrategy,
    seed: Seed,
    limit: Limit,
    selection: SelectionResult,
}

impl ResolvedFilter {
    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn grouping(&self) -> &GroupingStrategy {
        &self.grouping
    }

    pub fn selection(&self) -> &SelectionResult {
        &self.selection
    }

    pub fn summary(&self) -> SelectionSummary {
        self.selection.summary()
    }
}

impl TestFilter for ResolvedFilter {
    fn include(&self, id: &TestIdentifier) -> bool {
        match self.grouping.group_key(id) {
            Ok(key) => self.selection.contains(&key, id),
            Err(_) => false,
        }
    }

    fn decide(&self, id: &TestIdentifier) -> Decision {
        let Ok(key) = self.grouping.group_key(id) else {
            return Decision::Excluded {
                reason: NOT_DISCOVERED.to_string(),
            };
        };
        match self.selection.group(&key) {
            Some(group) if group.contains(id) => Decision::Included,
            Some(group) if group.was_discovered(id) => Decision::Excluded {
                reason: LIMIT_REACHED.to_string(),
            },
            _ => Decision::Excluded {
                reason: NOT_DISCOVERED.to_string(),
            },
        }
    }
}
