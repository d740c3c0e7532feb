use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scapegoat_tree::{Alpha, Error, ScapegoatSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys drawn from a narrow range so inserts and removes collide often.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

fn alpha_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.5), Just(0.8), Just(1.0), 0.5f64..=1.0]
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        4 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
    ]
}

// ─── Model-based properties ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Replays a random sequence of operations on both ScapegoatSet and
    /// BTreeSet and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(
        alpha in alpha_strategy(),
        ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE),
    ) {
        let mut sg_set: ScapegoatSet<i64> = ScapegoatSet::with_alpha(alpha).unwrap();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(sg_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(sg_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(sg_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(sg_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(sg_set.last(), bt_set.last(), "last()");
                }
            }
            prop_assert_eq!(sg_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(sg_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let expected: Vec<i64> = bt_set.iter().copied().collect();
        prop_assert_eq!(sg_set.values(), expected);
    }

    /// values() is strictly ascending and its length is len().
    #[test]
    fn values_are_strictly_ascending(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let set: ScapegoatSet<i64> = values.iter().copied().collect();
        let listed = set.values();

        prop_assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(listed.len(), set.len());
        prop_assert_eq!(set.iter().count(), set.len());
        prop_assert!(set.iter().copied().eq(listed.iter().copied()));
    }

    /// A failed insert or remove leaves the contents untouched.
    #[test]
    fn failed_mutations_do_not_change_contents(
        values in proptest::collection::vec(value_strategy(), 1..500),
        probe in value_strategy(),
    ) {
        let mut set: ScapegoatSet<i64> = values.iter().copied().collect();
        let present = values[0];
        let before = set.values();

        prop_assert!(!set.insert(present));
        prop_assert_eq!(set.values(), before.clone());

        if !set.contains(&probe) {
            prop_assert!(!set.remove(&probe));
            prop_assert_eq!(set.values(), before);
        }
    }

    /// Membership is exactly "inserted and not removed since".
    #[test]
    fn membership_tracks_history(
        inserts in proptest::collection::vec(value_strategy(), 0..500),
        removes in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let mut set: ScapegoatSet<i64> = ScapegoatSet::new();
        set.extend(inserts.iter().copied());
        for v in &removes {
            set.remove(v);
        }

        for k in -500..500 {
            let expected = inserts.contains(&k) && !removes.contains(&k);
            prop_assert_eq!(set.contains(&k), expected, "contains({})", k);
        }
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn round_trip_in_any_order() {
    let orders: [[i64; 9]; 3] = [
        [5, 3, 8, 1, 4, 7, 9, 2, 6],
        [1, 2, 3, 4, 5, 6, 7, 8, 9],
        [9, 1, 8, 2, 7, 3, 6, 4, 5],
    ];
    for order in orders {
        let set = ScapegoatSet::from(order);
        assert_eq!(set.values(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }
}

#[test]
fn remove_node_with_two_children() {
    let mut set = ScapegoatSet::from([10, 5, 15, 3, 7, 12, 18]);

    assert!(set.remove(&10));

    assert_eq!(set.values(), vec![3, 5, 7, 12, 15, 18]);
    assert!(!set.contains(&10));
    assert_eq!(set.len(), 6);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut set = ScapegoatSet::from([1, 2, 3]);
    assert!(!set.insert(2));
    assert_eq!(set.values(), vec![1, 2, 3]);
}

#[test]
fn invalid_alpha_is_rejected() {
    for alpha in [0.3, 1.5, -1.0, f64::NAN] {
        let result = ScapegoatSet::<i64>::with_alpha(alpha);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })), "alpha {alpha} was accepted");
    }
    assert_eq!(ScapegoatSet::<i64>::with_alpha(0.3).err(), Some(Error::InvalidArgument { alpha: 0.3 }));
}

#[test]
fn boundary_alphas_are_accepted() {
    for alpha in [0.5, 0.75, 1.0] {
        let set = ScapegoatSet::<i64>::with_alpha(alpha).unwrap();
        assert_eq!(set.alpha(), Alpha::new(alpha).unwrap());
    }
    assert_eq!(ScapegoatSet::<i64>::new().alpha(), Alpha::DEFAULT);
}

#[test]
fn empty_set() {
    let mut set: ScapegoatSet<i64> = ScapegoatSet::default();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(!set.contains(&0));
    assert!(!set.remove(&0));
    assert_eq!(set.values(), Vec::<i64>::new());
    assert_eq!(set.iter().next(), None);
}

#[test]
fn removing_everything_empties_the_set() {
    let mut set: ScapegoatSet<i64> = (0..100).collect();
    for k in (0..100).rev() {
        assert!(set.remove(&k));
    }
    assert!(set.is_empty());
    assert!(set.insert(42));
    assert_eq!(set.values(), vec![42]);
}

#[test]
fn sequential_inserts_then_removes() {
    const N: i64 = 20_000;
    let mut set = ScapegoatSet::new();

    for k in 1..=N {
        assert!(set.insert(k));
    }
    assert_eq!(set.len(), N as usize);
    for k in 1..=N {
        assert!(set.contains(&k));
        assert!(!set.insert(k));
    }
    assert!(!set.contains(&0));
    assert!(!set.contains(&(N + 1)));

    for k in (1..=N).step_by(2) {
        assert!(set.remove(&k));
    }
    for k in 1..=N {
        assert_eq!(set.contains(&k), k % 2 == 0, "contains({k})");
    }
    assert_eq!(set.len(), (N / 2) as usize);
    assert_eq!(set.values(), (2..=N).step_by(2).collect::<Vec<_>>());
}

#[test]
fn descending_inserts_with_strict_alpha() {
    let mut set = ScapegoatSet::with_alpha(0.5).unwrap();
    for k in (0..5_000i64).rev() {
        assert!(set.insert(k));
    }
    assert_eq!(set.values(), (0..5_000).collect::<Vec<_>>());
}

#[test]
fn clone_is_independent() {
    let mut original: ScapegoatSet<i64> = (0..10).collect();
    let copy = original.clone();
    original.remove(&3);

    assert!(copy.contains(&3));
    assert_eq!(copy.len(), 10);
    assert_eq!(original.len(), 9);
}

#[test]
fn borrowed_lookups() {
    let set: ScapegoatSet<String> = ["pear", "apple", "fig"].iter().map(|s| s.to_string()).collect();
    assert!(set.contains("fig"));
    assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    assert_eq!(set.first().map(String::as_str), Some("apple"));
    assert_eq!((&set).into_iter().map(String::as_str).collect::<Vec<_>>(), vec!["apple", "fig", "pear"]);
}
