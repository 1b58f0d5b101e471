//! Property-based tests for `ParallelList`.
//!
//! Differential testing against `BTreeSet` as an oracle, single-threaded.

use std::collections::BTreeSet;

use parallel_list_core::{DeferredGuard, ParallelList};
use proptest::prelude::*;

type DeferredList = ParallelList<i16, DeferredGuard>;

/// Operations for random testing.
#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Delete(i16),
    Contains(i16),
}

/// Small key space so inserts, deletes and lookups collide often.
fn op() -> impl Strategy<Value = Op> {
    let key = -64i16..64;
    prop_oneof![
        key.clone().prop_map(Op::Insert),
        key.clone().prop_map(Op::Delete),
        key.prop_map(Op::Contains),
    ]
}

fn range_keys(list: &DeferredList) -> Vec<i16> {
    let mut keys = Vec::new();
    list.range(|k| {
        keys.push(*k);
        true
    });
    keys
}

proptest! {
    #[test]
    fn matches_btreeset(ops in prop::collection::vec(op(), 0..300)) {
        let list = DeferredList::new();
        let mut oracle = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => prop_assert_eq!(list.insert(k), oracle.insert(k)),
                Op::Delete(k) => prop_assert_eq!(list.delete(&k), oracle.remove(&k)),
                Op::Contains(k) => prop_assert_eq!(list.contains(&k), oracle.contains(&k)),
            }
        }

        let keys = range_keys(&list);
        let expected: Vec<i16> = oracle.iter().copied().collect();
        prop_assert_eq!(&keys, &expected);
        prop_assert_eq!(list.len(), oracle.len());
        prop_assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn distinct_inserts_minus_deletes(
        inserted in prop::collection::btree_set(any::<i16>(), 0..200),
        delete_mask in prop::collection::vec(any::<bool>(), 200),
    ) {
        let list = DeferredList::new();
        for k in &inserted {
            prop_assert!(list.insert(*k));
        }

        let mut remaining = BTreeSet::new();
        for (k, delete) in inserted.iter().zip(delete_mask.iter()) {
            if *delete {
                prop_assert!(list.delete(k));
                prop_assert!(!list.delete(k));
            } else {
                remaining.insert(*k);
            }
        }

        let keys = range_keys(&list);
        for window in keys.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        prop_assert_eq!(keys, remaining.into_iter().collect::<Vec<_>>());
    }
}
