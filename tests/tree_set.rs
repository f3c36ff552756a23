use std::collections::BTreeSet;

use boundary_tree::{Error, TreeSet};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn value_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    Contains(i64),
    Get(i64),
    First,
    Last,
    EraseLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Get),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::EraseLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut set: TreeSet<i64> = TreeSet::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Insert(v) => {
                    let expected = model.insert(v);
                    let (cursor, inserted) = set.insert(v);
                    prop_assert_eq!(inserted, expected, "insert({})", v);
                    prop_assert_eq!(*cursor.key(), v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(set.remove(&v), model.remove(&v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(set.take(&v), model.take(&v), "take({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(set.contains(&v), model.contains(&v), "contains({})", v);
                }
                SetOp::Get(v) => {
                    prop_assert_eq!(set.get(&v), model.get(&v), "get({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(set.first(), model.first());
                }
                SetOp::Last => {
                    prop_assert_eq!(set.last(), model.last());
                }
                SetOp::EraseLast => {
                    if let Some(id) = set.end().map(|c| c.id()) {
                        prop_assert_eq!(set.erase(id).ok(), model.pop_last());
                        prop_assert_eq!(set.erase(id), Err(Error::KeyNotFound));
                    }
                }
            }
            prop_assert_eq!(set.len(), model.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(set.iter().eq(model.iter()));
    }

    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let set: TreeSet<i64> = values.iter().copied().collect();
        let model: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert!(set.iter().eq(model.iter()));
        prop_assert!(set.iter().rev().eq(model.iter().rev()));
        prop_assert_eq!(set.iter().len(), model.len());
        prop_assert!(set.into_iter().eq(model.into_iter()));
    }

    #[test]
    fn cursor_walk_covers_every_element(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let set: TreeSet<i64> = values.iter().copied().collect();
        let mut cursor = set.begin().unwrap();
        let end = set.end().unwrap();
        let mut walked = vec![*cursor.key()];
        while cursor != end {
            cursor.move_next();
            walked.push(*cursor.key());
        }
        prop_assert!(cursor.is_end());
        prop_assert!(!cursor.move_next());
        prop_assert_eq!(walked, set.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn merge_matches_model(
        left in proptest::collection::vec(value_strategy(), 0..500),
        right in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let mut a: TreeSet<i64> = left.iter().copied().collect();
        let mut b: TreeSet<i64> = right.iter().copied().collect();
        let left_model: BTreeSet<i64> = left.into_iter().collect();
        let right_model: BTreeSet<i64> = right.into_iter().collect();

        a.merge(&mut b);
        prop_assert!(a.iter().eq(left_model.union(&right_model)));
        prop_assert!(b.iter().eq(left_model.intersection(&right_model)));
    }

    #[test]
    fn clone_and_swap(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let original: TreeSet<i64> = values.into_iter().collect();
        let mut a = original.clone();
        let mut b = TreeSet::from([i64::MAX]);
        a.swap(&mut b);
        prop_assert_eq!(a.len(), 1);
        a.swap(&mut b);
        prop_assert_eq!(&a, &original);
        prop_assert_eq!(b.into_iter().collect::<Vec<_>>(), vec![i64::MAX]);
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

#[test]
fn from_array_extend_and_default() {
    let mut set: TreeSet<u8> = TreeSet::default();
    set.extend([3, 1, 2]);
    set.extend(&[2, 5]);
    assert_eq!(set, TreeSet::from([1, 2, 3, 5]));
    assert_eq!(format!("{set:?}"), "{1, 2, 3, 5}");
    assert_eq!((&set).into_iter().count(), 4);
}

#[test]
fn ordering_is_lexicographic() {
    let a = TreeSet::from([1, 2]);
    let b = TreeSet::from([1, 3]);
    assert!(a < b);
    assert_eq!(a.cmp(&a.clone()), std::cmp::Ordering::Equal);
}

#[test]
fn capacity_and_max_size() {
    let set: TreeSet<u64> = TreeSet::with_capacity(8);
    assert!(set.capacity() >= 8);
    assert!(set.max_size() >= 8);
}

// ─── Send/Sync ────────────────────────────────────────────────────────────────

mod send_sync_tests {
    use boundary_tree::TreeSet;
    use boundary_tree::tree_set::{IntoIter, Iter};

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn set_and_iterators_are_send_sync() {
        assert_send::<TreeSet<i64>>();
        assert_sync::<TreeSet<i64>>();
        assert_send::<Iter<'_, i64>>();
        assert_sync::<Iter<'_, i64>>();
        assert_send::<IntoIter<i64>>();
        assert_sync::<IntoIter<i64>>();
    }
}

// ─── Serde ────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serde_tests {
    use boundary_tree::TreeSet;
    use pretty_assertions::assert_eq;

    #[test]
    fn bincode_round_trip() {
        let set: TreeSet<i32> = [12, 2, 16, 13, 0].into_iter().collect();
        let bytes = bincode::serialize(&set).unwrap();
        let back: TreeSet<i32> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, set);
        assert_eq!(bincode::serialize(&back).unwrap(), bytes);
    }
}
