use parallel_list_core::common_tests::parallel_list_core_tests::*;
use parallel_list_core::{DeferredGuard, ParallelList};
use rstest::rstest;

type DeferredList = ParallelList<i32, DeferredGuard>;

#[rstest]
#[case::fresh(DeferredList::new())]
#[case::default(DeferredList::default())]
fn test_basic(#[case] list: DeferredList) {
    test_basic_operations(&list);
}

#[rstest]
fn test_range_ascending() {
    test_range_order(&DeferredList::new());
}

#[rstest]
fn test_range_stops() {
    test_range_early_stop(&DeferredList::new());
}

#[rstest]
fn test_duplicate() {
    test_duplicate_insert(&DeferredList::new());
}

#[rstest]
fn test_absent_delete() {
    test_delete_absent(&DeferredList::new());
}

#[rstest]
fn test_delete_then_contains() {
    test_insert_delete_contains(&DeferredList::new());
}

#[rstest]
fn test_len() {
    test_len_operations(&DeferredList::new());
}

#[rstest]
fn test_iter() {
    test_iter_operations(&DeferredList::new());
}

#[rstest]
fn test_sequential() {
    test_sequential_operations::<DeferredGuard>();
}

#[rstest]
fn test_empty() {
    test_is_empty::<DeferredGuard>();
}

#[rstest]
fn test_concurrent() {
    test_concurrent_operations::<DeferredGuard>();
}

#[rstest]
fn test_concurrent_mixed() {
    test_concurrent_mixed_operations::<DeferredGuard>();
}

#[rstest]
fn test_contention() {
    test_high_contention::<DeferredGuard>();
}

#[rstest]
#[case::i64_keys(vec![3i64, -1, 7, 0])]
#[case::string_keys(vec!["pear".to_string(), "apple".to_string(), "fig".to_string()])]
fn test_generic_keys<K: Ord + Clone + std::fmt::Debug + Send + Sync + 'static>(#[case] keys: Vec<K>) {
    let list: ParallelList<K, DeferredGuard> = ParallelList::new();
    for key in &keys {
        assert!(list.insert(key.clone()));
    }

    let mut expected = keys.clone();
    expected.sort();
    assert_eq!(list.to_vec(), expected);

    for key in &keys {
        assert!(list.delete(key));
    }
    assert!(list.is_empty());
    assert_eq!(list.guard().retired_count(), keys.len());
}
