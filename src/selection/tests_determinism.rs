//! Determinism tests
//!
//! Same seed and same input order must always give the same selection;
//! different group keys must get different shuffles.

use super::*;

#[test]
fn test_select_is_reproducible() {
    let key = GroupKey::from("suite");
    let group = numbered_group("suite", 20);

    let first = select(&key, &group, Seed::new(42), Limit::AtMost(5));
    let second = select(&key, &group, Seed::new(42), Limit::AtMost(5));
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn test_group_rng_is_reproducible() {
    use rand::Rng;

    let key = GroupKey::from("suite");
    let mut a = group_rng(Seed::new(9), &key);
    let mut b = group_rng(Seed::new(9), &key);
    for _ in 0..16 {
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }
}

#[test]
fn test_different_keys_get_different_permutations() {
    let a = permutation(Seed::new(42), &GroupKey::from("alpha"), 20);
    let b = permutation(Seed::new(42), &GroupKey::from("beta"), 20);
    assert_ne!(a, b, "groups with distinct keys should not share a shuffle");
}

#[test]
fn test_different_seeds_get_different_permutations() {
    let key = GroupKey::from("suite");
    let a = permutation(Seed::new(1), &key, 20);
    let b = permutation(Seed::new(2), &key, 20);
    assert_ne!(a, b);
}

#[test]
fn test_permutation_covers_every_index_once() {
    let mut order = permutation(Seed::new(7), &GroupKey::from("suite"), 50);
    order.sort_unstable();
    assert_eq!(order, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_selection_is_prefix_of_permutation() {
    let key = GroupKey::from("suite");
    let group = numbered_group("suite", 12);
    let order = permutation(Seed::new(3), &key, group.len());

    let selected = select(&key, &group, Seed::new(3), Limit::AtMost(4));
    let expected: Vec<TestIdentifier> = order[..4].iter().map(|&i| group[i].clone()).collect();
    assert_eq!(selected, expected);
}

#[test]
fn test_compute_matches_per_group_select() {
    use crate::grouping::GroupingStrategy;

    let mut universe = numbered_group("a", 6);
    universe.extend(numbered_group("b", 9));
    let groups = GroupingStrategy::default()
        .partition(universe)
        .expect("should partition");

    let result = SelectionResult::compute(&groups, Seed::new(11), Limit::AtMost(3));
    for (key, members) in groups.iter() {
        let expected = select(key, members, Seed::new(11), Limit::AtMost(3));
        let group = result.group(key).expect("group should be present");
        assert_eq!(group.retained(), expected.as_slice());
    }
}
