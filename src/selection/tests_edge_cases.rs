//! Edge case tests
//!
//! Empty groups, zero limits, limits larger than the group, unbounded limits.

use super::*;
use crate::grouping::GroupingStrategy;

#[test]
fn test_empty_group_selects_nothing() {
    let selected = select(&GroupKey::from("empty"), &[], Seed::new(1), Limit::AtMost(3));
    assert!(selected.is_empty());
}

#[test]
fn test_zero_limit_selects_nothing() {
    let group = numbered_group("suite", 10);
    let selected = select(&GroupKey::from("suite"), &group, Seed::new(1), Limit::AtMost(0));
    assert!(selected.is_empty());
}

#[test]
fn test_oversized_limit_keeps_whole_group_shuffled() {
    let key = GroupKey::from("suite");
    let group = numbered_group("suite", 3);
    let selected = select(&key, &group, Seed::new(5), Limit::AtMost(10));

    assert_eq!(selected.len(), 3);
    let mut sorted = selected.clone();
    sorted.sort();
    let mut original = group.clone();
    original.sort();
    assert_eq!(sorted, original, "all members retained");

    let order = permutation(Seed::new(5), &key, 3);
    let expected: Vec<TestIdentifier> = order.iter().map(|&i| group[i].clone()).collect();
    assert_eq!(selected, expected, "bounded limits always follow the shuffle");
}

#[test]
fn test_unbounded_keeps_discovery_order() {
    let group = numbered_group("suite", 8);
    let selected = select(&GroupKey::from("suite"), &group, Seed::new(5), Limit::Unbounded);
    assert_eq!(selected, group);
}

#[test]
fn test_seven_of_twenty_in_one_group() {
    let universe: Vec<TestIdentifier> = (0..20)
        .map(|i| TestIdentifier::new(format!("test-{}", i)))
        .collect();
    let groups = GroupingStrategy::Global
        .partition(universe.clone())
        .expect("should partition");
    let result = SelectionResult::compute(&groups, Seed::new(2024), Limit::AtMost(7));

    let key = GroupKey::from(crate::grouping::GLOBAL_GROUP);
    let included = universe.iter().filter(|id| result.contains(&key, id)).count();
    assert_eq!(included, 7);
    assert_eq!(universe.len() - included, 13);
}

#[test]
fn test_limit_equal_to_total_includes_everything() {
    let universe: Vec<TestIdentifier> = (0..50)
        .map(|i| TestIdentifier::new(format!("test-{}", i)))
        .collect();
    let groups = GroupingStrategy::Global
        .partition(universe.clone())
        .expect("should partition");
    let result = SelectionResult::compute(&groups, Seed::new(1), Limit::AtMost(50));

    let key = GroupKey::from(crate::grouping::GLOBAL_GROUP);
    assert!(universe.iter().all(|id| result.contains(&key, id)));
}

#[test]
fn test_summary_counts() {
    let mut universe = numbered_group("a", 2);
    universe.extend(numbered_group("b", 5));
    universe.extend(numbered_group("c", 4));
    let groups = GroupingStrategy::default()
        .partition(universe)
        .expect("should partition");

    let summary = SelectionResult::compute(&groups, Seed::new(8), Limit::AtMost(3)).summary();
    assert_eq!(
        summary,
        SelectionSummary {
            discovered: 11,
            selected: 2 + 3 + 3,
            groups: 3,
            truncated_groups: 2,
        }
    );
}

#[test]
fn test_unknown_group_contains_nothing() {
    let groups = GroupingStrategy::default()
        .partition(numbered_group("a", 3))
        .expect("should partition");
    let result = SelectionResult::compute(&groups, Seed::new(1), Limit::Unbounded);
    assert!(!result.contains(&GroupKey::from("zzz"), &TestIdentifier::from("zzz::0")));
    assert!(result.group(&GroupKey::from("zzz")).is_none());
}
