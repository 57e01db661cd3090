//! Tests for StorageVec
//!
//! These tests verify:
//! - Basic operations (push/pop/get/set/first/last)
//! - Order-changing operations (swap/swap_remove/remove/insert/reverse)
//! - Bulk operations (fill/resize/clear)
//! - Precondition failures leave state untouched
//! - Slot operation counts match the contract
//! - Vectors with distinct bases never alias

use std::sync::Arc;

use slotvec::{BaseKey, MemoryStore, SlotVecError, StorageVec};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_string_vec() -> (Arc<MemoryStore>, StorageVec<String, Arc<MemoryStore>>) {
    let store = Arc::new(MemoryStore::new());
    let vec = StorageVec::new(Arc::clone(&store), BaseKey::from_name("strings"));
    (store, vec)
}

fn setup_u64_vec() -> (Arc<MemoryStore>, StorageVec<u64, Arc<MemoryStore>>) {
    let store = Arc::new(MemoryStore::new());
    let vec = StorageVec::new(Arc::clone(&store), BaseKey::from_name("numbers"));
    (store, vec)
}

fn seed(vec: &StorageVec<String, Arc<MemoryStore>>, values: &[&str]) {
    for value in values {
        vec.push(value.to_string()).unwrap();
    }
}

fn contents(vec: &StorageVec<String, Arc<MemoryStore>>) -> Vec<String> {
    vec.to_vec().unwrap()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_vector_is_empty() {
    let (_store, vec) = setup_string_vec();

    assert_eq!(vec.len().unwrap(), 0);
    assert!(vec.is_empty().unwrap());
}

#[test]
fn test_push_updates_length_and_contents() {
    let (_store, vec) = setup_string_vec();

    seed(&vec, &["a", "b", "c"]);

    assert_eq!(vec.len().unwrap(), 3);
    assert_eq!(vec.get(0).unwrap(), "a");
    assert_eq!(vec.get(2).unwrap(), "c");
}

#[test]
fn test_push_pop_round_trip() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);

    vec.push("v".to_string()).unwrap();

    assert_eq!(vec.pop().unwrap(), "v");
    assert_eq!(vec.len().unwrap(), 2);
    assert_eq!(contents(&vec), ["a", "b"]);
}

#[test]
fn test_get_set_round_trip() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    for i in 0..3 {
        let value = format!("x{}", i);
        vec.set(i, value.clone()).unwrap();
        assert_eq!(vec.get(i).unwrap(), value);
    }

    assert_eq!(vec.len().unwrap(), 3);
}

#[test]
fn test_first_and_last() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    assert_eq!(vec.first().unwrap(), "a");
    assert_eq!(vec.last().unwrap(), "c");
}

#[test]
fn test_is_empty_tracks_len_through_operations() {
    let (_store, vec) = setup_string_vec();

    assert_eq!(vec.is_empty().unwrap(), vec.len().unwrap() == 0);

    vec.push("a".to_string()).unwrap();
    assert_eq!(vec.is_empty().unwrap(), vec.len().unwrap() == 0);

    vec.insert(0, "b".to_string()).unwrap();
    assert_eq!(vec.is_empty().unwrap(), vec.len().unwrap() == 0);

    vec.pop().unwrap();
    assert_eq!(vec.is_empty().unwrap(), vec.len().unwrap() == 0);

    vec.remove(0).unwrap();
    assert_eq!(vec.is_empty().unwrap(), vec.len().unwrap() == 0);
    assert!(vec.is_empty().unwrap());
}

#[test]
fn test_u64_elements_round_trip() {
    let (_store, vec) = setup_u64_vec();

    vec.push(10).unwrap();
    vec.push(20).unwrap();
    vec.push(30).unwrap();

    assert_eq!(vec.get(1).unwrap(), 20);
    assert_eq!(vec.pop().unwrap(), 30);
    assert_eq!(vec.to_vec().unwrap(), [10, 20]);
}

// =============================================================================
// Boundary Tests
// =============================================================================

#[test]
fn test_pop_empty_fails() {
    let (_store, vec) = setup_string_vec();

    assert!(matches!(vec.pop(), Err(SlotVecError::Empty)));
}

#[test]
fn test_first_last_empty_fail() {
    let (_store, vec) = setup_string_vec();

    assert!(matches!(vec.first(), Err(SlotVecError::Empty)));
    assert!(matches!(vec.last(), Err(SlotVecError::Empty)));
}

#[test]
fn test_index_operations_out_of_bounds() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    assert!(matches!(
        vec.get(3),
        Err(SlotVecError::OutOfBounds { index: 3, len: 3 })
    ));
    assert!(matches!(
        vec.set(3, "x".to_string()),
        Err(SlotVecError::OutOfBounds { .. })
    ));
    assert!(matches!(
        vec.remove(3),
        Err(SlotVecError::OutOfBounds { .. })
    ));
    assert!(matches!(
        vec.swap_remove(3),
        Err(SlotVecError::OutOfBounds { .. })
    ));
    assert!(matches!(
        vec.swap(0, 3),
        Err(SlotVecError::OutOfBounds { .. })
    ));
}

#[test]
fn test_insert_allows_len_but_not_beyond() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);

    // index == len appends
    vec.insert(2, "c".to_string()).unwrap();
    assert_eq!(contents(&vec), ["a", "b", "c"]);

    // index > len is rejected
    assert!(matches!(
        vec.insert(4, "x".to_string()),
        Err(SlotVecError::OutOfBounds { index: 4, len: 3 })
    ));
}

#[test]
fn test_failed_operation_leaves_state_unchanged() {
    let (store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);
    store.reset_counters();

    vec.remove(9).unwrap_err();
    vec.insert(9, "x".to_string()).unwrap_err();
    vec.swap(0, 9).unwrap_err();

    // Precondition failures happen before any write
    assert_eq!(store.write_count(), 0);
    assert_eq!(vec.len().unwrap(), 3);
    assert_eq!(contents(&vec), ["a", "b", "c"]);
}

// =============================================================================
// Order-changing Operations Tests
// =============================================================================

#[test]
fn test_swap() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    vec.swap(0, 2).unwrap();

    assert_eq!(contents(&vec), ["c", "b", "a"]);
}

#[test]
fn test_swap_same_index_is_noop() {
    let (store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);
    store.reset_counters();

    vec.swap(1, 1).unwrap();

    assert_eq!(store.write_count(), 0);
    assert_eq!(contents(&vec), ["a", "b"]);
}

#[test]
fn test_swap_remove_moves_last_into_hole() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    assert_eq!(vec.swap_remove(0).unwrap(), "a");
    assert_eq!(contents(&vec), ["c", "b"]);
}

#[test]
fn test_swap_remove_last_element() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    assert_eq!(vec.swap_remove(2).unwrap(), "c");
    assert_eq!(contents(&vec), ["a", "b"]);
}

#[test]
fn test_swap_remove_preserves_other_order() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c", "d", "e"]);

    assert_eq!(vec.swap_remove(1).unwrap(), "b");

    // Only position 1 changed; everything else kept its relative order
    assert_eq!(contents(&vec), ["a", "e", "c", "d"]);
}

#[test]
fn test_remove_front() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    assert_eq!(vec.remove(0).unwrap(), "a");
    assert_eq!(contents(&vec), ["b", "c"]);
}

#[test]
fn test_remove_middle_and_last() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c", "d"]);

    assert_eq!(vec.remove(1).unwrap(), "b");
    assert_eq!(contents(&vec), ["a", "c", "d"]);

    assert_eq!(vec.remove(2).unwrap(), "d");
    assert_eq!(contents(&vec), ["a", "c"]);
}

#[test]
fn test_insert_shifts_up() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    vec.insert(1, "x".to_string()).unwrap();

    assert_eq!(contents(&vec), ["a", "x", "b", "c"]);
}

#[test]
fn test_insert_front() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);

    vec.insert(0, "x".to_string()).unwrap();

    assert_eq!(contents(&vec), ["x", "a", "b"]);
}

#[test]
fn test_insert_remove_round_trip_all_positions() {
    for i in 0..=3u64 {
        let (_store, vec) = setup_string_vec();
        seed(&vec, &["a", "b", "c"]);

        vec.insert(i, "x".to_string()).unwrap();
        assert_eq!(vec.remove(i).unwrap(), "x");

        assert_eq!(contents(&vec), ["a", "b", "c"], "position {}", i);
    }
}

#[test]
fn test_reverse() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c", "d"]);

    vec.reverse().unwrap();
    assert_eq!(contents(&vec), ["d", "c", "b", "a"]);

    // Applying twice restores the original order
    vec.reverse().unwrap();
    assert_eq!(contents(&vec), ["a", "b", "c", "d"]);
}

#[test]
fn test_reverse_odd_length() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    vec.reverse().unwrap();

    assert_eq!(contents(&vec), ["c", "b", "a"]);
}

#[test]
fn test_reverse_short_vectors_noop() {
    let (store, vec) = setup_string_vec();

    vec.reverse().unwrap();
    assert!(vec.is_empty().unwrap());

    seed(&vec, &["a"]);
    store.reset_counters();

    vec.reverse().unwrap();
    assert_eq!(store.write_count(), 0);
    assert_eq!(contents(&vec), ["a"]);
}

// =============================================================================
// Bulk Operations Tests
// =============================================================================

#[test]
fn test_fill() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    vec.fill("q".to_string()).unwrap();

    assert_eq!(vec.len().unwrap(), 3);
    assert_eq!(contents(&vec), ["q", "q", "q"]);
}

#[test]
fn test_resize_grow() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);

    vec.resize(5, "z".to_string()).unwrap();

    assert_eq!(contents(&vec), ["a", "b", "z", "z", "z"]);
}

#[test]
fn test_resize_shrink() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);
    vec.resize(5, "z".to_string()).unwrap();

    vec.resize(1, "z".to_string()).unwrap();

    assert_eq!(contents(&vec), ["a"]);
}

#[test]
fn test_resize_same_length() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b"]);

    vec.resize(2, "z".to_string()).unwrap();

    assert_eq!(contents(&vec), ["a", "b"]);
}

#[test]
fn test_clear_resets_length() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    vec.clear().unwrap();

    assert_eq!(vec.len().unwrap(), 0);
    assert!(vec.is_empty().unwrap());
}

// =============================================================================
// Stale Slot Tests
// =============================================================================

#[test]
fn test_clear_leaves_slots_in_place() {
    let (store, vec) = setup_u64_vec();
    for i in 0..3 {
        vec.push(i).unwrap();
    }

    // 3 element slots + the header
    assert_eq!(store.word_count(), 4);

    vec.clear().unwrap();

    // Slots are unreachable, not erased
    assert_eq!(store.word_count(), 4);
    assert_eq!(vec.len().unwrap(), 0);
}

#[test]
fn test_pop_leaves_slot_in_place() {
    let (store, vec) = setup_u64_vec();
    vec.push(1).unwrap();
    vec.push(2).unwrap();

    vec.pop().unwrap();

    assert_eq!(store.word_count(), 3);
    assert_eq!(vec.len().unwrap(), 1);
}

#[test]
fn test_growth_overwrites_stale_slots() {
    let (_store, vec) = setup_u64_vec();
    vec.push(1).unwrap();
    vec.push(2).unwrap();
    vec.clear().unwrap();

    vec.push(9).unwrap();

    assert_eq!(vec.to_vec().unwrap(), [9]);
}

// =============================================================================
// Operation Cost Tests
// =============================================================================

#[test]
fn test_swap_remove_is_constant_cost() {
    let (store, vec) = setup_u64_vec();
    for i in 0..8 {
        vec.push(i).unwrap();
    }
    store.reset_counters();

    vec.swap_remove(0).unwrap();

    // Length + removed slot + last slot read; hole + length written
    assert_eq!(store.read_count(), 3);
    assert_eq!(store.write_count(), 2);
}

#[test]
fn test_remove_cost_scales_with_tail() {
    let (store, vec) = setup_u64_vec();
    for i in 0..5 {
        vec.push(i).unwrap();
    }
    store.reset_counters();

    vec.remove(2).unwrap();

    // Length + removed slot + 2 shifted slots read; 2 shifted + length written
    assert_eq!(store.read_count(), 4);
    assert_eq!(store.write_count(), 3);
}

#[test]
fn test_insert_cost_scales_with_tail() {
    let (store, vec) = setup_u64_vec();
    for i in 0..5 {
        vec.push(i).unwrap();
    }
    store.reset_counters();

    vec.insert(2, 99).unwrap();

    // Length + 3 shifted slots read; 3 shifted + new slot + length written
    assert_eq!(store.read_count(), 4);
    assert_eq!(store.write_count(), 5);
    assert_eq!(vec.to_vec().unwrap(), [0, 1, 99, 2, 3, 4]);
}

#[test]
fn test_shrink_is_constant_cost() {
    let (store, vec) = setup_u64_vec();
    for i in 0..5 {
        vec.push(i).unwrap();
    }
    store.reset_counters();

    vec.resize(1, 0).unwrap();

    // One length read, one length write, nothing else
    assert_eq!(store.read_count(), 1);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn test_fill_writes_single_payload() {
    let (store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);
    store.reset_counters();

    vec.fill("q".to_string()).unwrap();

    // The fill value is encoded once and its word replicated
    assert_eq!(store.payload_write_count(), 1);
    assert_eq!(store.write_count(), 3);
    assert_eq!(store.read_count(), 1);
}

// =============================================================================
// Isolation Tests
// =============================================================================

#[test]
fn test_distinct_bases_never_alias() {
    let store = Arc::new(MemoryStore::new());
    let left: StorageVec<String, _> =
        StorageVec::new(Arc::clone(&store), BaseKey::from_name("left"));
    let right: StorageVec<String, _> =
        StorageVec::new(Arc::clone(&store), BaseKey::from_name("right"));

    left.push("a".to_string()).unwrap();
    left.push("b".to_string()).unwrap();
    right.push("z".to_string()).unwrap();

    left.remove(0).unwrap();
    left.fill("x".to_string()).unwrap();

    assert_eq!(left.to_vec().unwrap(), ["x"]);
    assert_eq!(right.to_vec().unwrap(), ["z"]);
}

#[test]
fn test_handle_reconstruction_sees_same_data() {
    let store = Arc::new(MemoryStore::new());
    let base = BaseKey::from_name("durable");

    let vec: StorageVec<String, _> = StorageVec::new(Arc::clone(&store), base);
    seed(&vec, &["a", "b"]);
    drop(vec);

    // A fresh handle over the same store and base sees the same vector
    let again: StorageVec<String, _> = StorageVec::new(Arc::clone(&store), base);
    assert_eq!(again.to_vec().unwrap(), ["a", "b"]);
    assert_eq!(again.base(), base);
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[test]
fn test_iter_yields_in_order() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    let items: Vec<String> = vec.iter().unwrap().map(|item| item.unwrap()).collect();

    assert_eq!(items, ["a", "b", "c"]);
}

#[test]
fn test_iter_empty() {
    let (_store, vec) = setup_string_vec();

    assert_eq!(vec.iter().unwrap().count(), 0);
}

#[test]
fn test_iter_size_hint() {
    let (_store, vec) = setup_string_vec();
    seed(&vec, &["a", "b", "c"]);

    let mut iter = vec.iter().unwrap();
    assert_eq!(iter.size_hint(), (3, Some(3)));

    iter.next().unwrap().unwrap();
    assert_eq!(iter.size_hint(), (2, Some(2)));
}
