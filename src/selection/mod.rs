//! Seeded subset selection
//!
//! Every group is shuffled with its own generator derived from the run seed
//! and the group key, then truncated to the limit. The whole run is a pure
//! function of (seed, limit, discovered universe in discovery order).
//!
//! Production code is in this file, tests are organized in sibling modules:
//! - tests_determinism: reproducibility and per-group independence
//! - tests_edge_cases: empty groups, zero and oversized limits

mod limit;

pub use limit::Limit;

use crate::grouping::Groups;
use crate::model::{GroupKey, TestIdentifier};
use crate::seed::Seed;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Build the generator for one group
///
/// The SHA-256 digest of the little-endian seed followed by the key bytes is
/// used directly as the 32-byte `StdRng` seed.
pub fn group_rng(seed: Seed, key: &GroupKey) -> StdRng {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(seed.value().to_le_bytes());
    hasher.update(key.as_bytes());
    let mut rng_seed = [0u8; 32];
    rng_seed.copy_from_slice(&hasher.finalize());
    StdRng::from_seed(rng_seed)
}

/// Shuffled order of the indices `0..len` for one group
pub fn permutation(seed: Seed, key: &GroupKey, len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut rng = group_rng(seed, key);
    order.shuffle(&mut rng);
    order
}

/// Select the retained tests of one group
///
/// Bounded limits always shuffle, even when the group is not truncated, so
/// the returned order depends only on the seed. `Limit::Unbounded` keeps the
/// group as discovered.
pub fn select(
    key: &GroupKey,
    group: &[TestIdentifier],
    seed: Seed,
    limit: Limit,
) -> Vec<TestIdentifier> {
    match limit {
        Limit::Unbounded => group.to_vec(),
        Limit::AtMost(_) => {
            let keep = limit.retained(group.len());
            permutation(seed, key, group.len())
                .into_iter()
                .take(keep)
                .map(|index| group[index].clone())
                .collect()
        }
    }
}

/// Retained tests of one group
#[derive(Debug, Clone)]
pub struct GroupSelection {
    retained: Vec<TestIdentifier>,
    kept: HashSet<TestIdentifier>,
    members: HashSet<TestIdentifier>,
}

impl GroupSelection {
    fn new(retained: Vec<TestIdentifier>, members: &[TestIdentifier]) -> Self {
        Self {
            kept: retained.iter().cloned().collect(),
            members: members.iter().cloned().collect(),
            retained,
        }
    }

    /// Retained tests in selection order
    pub fn retained(&self) -> &[TestIdentifier] {
        &self.retained
    }

    pub fn contains(&self, id: &TestIdentifier) -> bool {
        self.kept.contains(id)
    }

    /// Whether `id` belonged to this group before selection
    pub fn was_discovered(&self, id: &TestIdentifier) -> bool {
        self.members.contains(id)
    }

    /// Size of the group before selection
    pub fn discovered(&self) -> usize {
        self.members.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.retained.len() < self.members.len()
    }
}

/// Counts describing one computed selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub discovered: usize,
    pub selected: usize,
    pub groups: usize,
    pub truncated_groups: usize,
}

/// Immutable per-run mapping from group to retained tests
#[derive(Debug, Clone)]
pub struct SelectionResult {
    groups: BTreeMap<GroupKey, GroupSelection>,
}

impl SelectionResult {
    /// Run the selector over every group
    pub fn compute(groups: &Groups, seed: Seed, limit: Limit) -> Self {
        tracing::info!(
            total_tests = groups.total_tests(),
            group_count = groups.len(),
            "Total test count is {}",
            groups.total_tests()
        );
        tracing::info!(limit = %limit, "Test limit is {}", limit);

        let mut selected = BTreeMap::new();
        for (key, members) in groups.iter() {
            let retained = select(key, members, seed, limit);

            if limit.is_bounded() && retained.len() == members.len() {
                tracing::debug!(
                    group = %key,
                    group_size = members.len(),
                    limit = %limit,
                    "Test limit is not smaller than group size, retaining the whole group"
                );
            } else {
                tracing::debug!(
                    group = %key,
                    group_size = members.len(),
                    retained = retained.len(),
                    "Selected tests for group"
                );
            }

            selected.insert(key.clone(), GroupSelection::new(retained, members));
        }

        let result = Self { groups: selected };
        let summary = result.summary();
        tracing::info!(
            discovered = summary.discovered,
            selected = summary.selected,
            truncated_groups = summary.truncated_groups,
            "Selected {} of {} tests",
            summary.selected,
            summary.discovered
        );
        result
    }

    pub fn group(&self, key: &GroupKey) -> Option<&GroupSelection> {
        self.groups.get(key)
    }

    /// Whether `id` was retained in the group `key`
    pub fn contains(&self, key: &GroupKey, id: &TestIdentifier) -> bool {
        self.groups.get(key).is_some_and(|group| group.contains(id))
    }

    /// Iterate groups in key order
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &GroupSelection)> {
        self.groups.iter()
    }

    pub fn summary(&self) -> SelectionSummary {
        self.groups.values().fold(
            SelectionSummary {
                discovered: 0,
                selected: 0,
                groups: self.groups.len(),
                truncated_groups: 0,
            },
            |mut acc, group| {
                acc.discovered += group.discovered();
                acc.selected += group.retained().len();
                if group.is_truncated() {
                    acc.truncated_groups += 1;
                }
                acc
            },
        )
    }
}

// Test modules
#[cfg(test)]
mod tests_determinism;
#[cfg(test)]
mod tests_edge_cases;

/// Shared test helper: identifiers `prefix::0 .. prefix::{n-1}`
#[cfg(test)]
pub(crate) fn numbered_group(prefix: &str, n: usize) -> Vec<TestIdentifier> {
    (0..n)
        .map(|i| TestIdentifier::new(format!("{}::{}", prefix, i)))
        .collect()
}
