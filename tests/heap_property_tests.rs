//! Property-based tests using proptest
//!
//! These tests generate random operation sequences and verify that the
//! indexed heap's observable invariants hold after every step: the root
//! is always the minimum of the live multiset, the backing array keeps
//! heap order under insert/poll, membership tracks a reference model,
//! and sizes are conserved.
//!
//! `remove` is exercised against a multiset model for membership and
//! size only: relocations after a mid-heap removal deliberately skip the
//! upward sift (a preserved compatibility quirk), so heap order is *not*
//! asserted across removes.

use proptest::prelude::*;

use classic_collections::{HeapError, IndexedMinHeap, MinPriorityQueue};

/// Asserts min-heap order over the public array snapshot.
fn assert_heap_order(heap: &IndexedMinHeap<i32>) -> Result<(), TestCaseError> {
    let items = heap.as_slice();
    for i in 1..items.len() {
        let parent = (i - 1) / 2;
        prop_assert!(
            items[parent] <= items[i],
            "heap order violated: items[{}]={} > items[{}]={}",
            parent,
            items[parent],
            i,
            items[i]
        );
    }
    Ok(())
}

fn test_insert_poll_invariant(ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new();
    let mut model: Vec<i32> = Vec::new();

    for (should_poll, key) in ops {
        if should_poll && !heap.is_empty() {
            let polled = heap.poll();
            let expected = model.iter().min().copied();
            prop_assert_eq!(polled.ok(), expected);
            if let Some(min) = expected {
                let at = model.iter().position(|&v| v == min).unwrap();
                model.remove(at);
            }
        } else {
            heap.insert(key);
            model.push(key);
        }

        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.peek().ok(), model.iter().min().copied());
        assert_heap_order(&heap)?;
    }

    Ok(())
}

fn test_drain_is_sorted(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new();
    for &value in &values {
        heap.insert(value);
    }

    let mut sorted = values;
    sorted.sort_unstable();

    let mut drained = Vec::new();
    while let Ok(key) = heap.poll() {
        drained.push(key);
    }
    prop_assert_eq!(drained, sorted);
    prop_assert_eq!(heap.poll(), Err(HeapError::Empty));
    Ok(())
}

fn test_contains_matches_model(ops: Vec<(bool, i8)>) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new();
    // Narrow key domain so duplicates and re-insertions are common.
    let mut counts = [0usize; 256];

    for (should_remove, key) in ops {
        let key = key as i32;
        let slot = (key + 128) as usize;
        if should_remove {
            let removed = heap.remove(key);
            if counts[slot] > 0 {
                prop_assert_eq!(removed, Ok(key));
                counts[slot] -= 1;
            } else {
                prop_assert_eq!(removed, Err(HeapError::NotFound));
            }
        } else {
            heap.insert(key);
            counts[slot] += 1;
        }

        prop_assert_eq!(heap.contains(key), counts[slot] > 0);
        prop_assert_eq!(heap.len(), counts.iter().sum::<usize>());
    }

    Ok(())
}

fn test_size_conservation(inserts: Vec<i32>, polls: usize) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new();
    for &key in &inserts {
        heap.insert(key);
    }
    let polls = polls.min(inserts.len());
    for _ in 0..polls {
        prop_assert!(heap.poll().is_ok());
    }
    prop_assert_eq!(heap.len(), inserts.len() - polls);
    prop_assert_eq!(heap.is_empty(), inserts.len() == polls);
    Ok(())
}

fn test_iter_mirrors_array(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = IndexedMinHeap::new();
    for &value in &values {
        heap.insert(value);
    }
    let walked: Vec<(usize, i32)> = heap.iter().collect();
    let expected: Vec<(usize, i32)> = heap.as_slice().iter().copied().enumerate().collect();
    prop_assert_eq!(walked, expected);
    Ok(())
}

fn test_queue_forwards_heap_behavior(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut queue = MinPriorityQueue::new();
    let mut heap = IndexedMinHeap::new();
    for &value in &values {
        queue.enqueue(value);
        heap.insert(value);
    }
    prop_assert_eq!(queue.len(), heap.len());
    loop {
        match (queue.dequeue(), heap.poll()) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => {
                prop_assert_eq!(a, b);
                break;
            }
            (a, b) => prop_assert!(false, "queue {:?} diverged from heap {:?}", a, b),
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn insert_poll_invariant(ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..100)) {
        test_insert_poll_invariant(ops)?;
    }

    #[test]
    fn drain_is_sorted(values in prop::collection::vec(-1000i32..1000, 0..200)) {
        test_drain_is_sorted(values)?;
    }

    #[test]
    fn contains_matches_model(ops in prop::collection::vec((prop::bool::ANY, -5i8..5), 0..100)) {
        test_contains_matches_model(ops)?;
    }

    #[test]
    fn size_conservation(
        inserts in prop::collection::vec(-100i32..100, 0..100),
        polls in 0usize..150
    ) {
        test_size_conservation(inserts, polls)?;
    }

    #[test]
    fn iter_mirrors_array(values in prop::collection::vec(-100i32..100, 0..100)) {
        test_iter_mirrors_array(values)?;
    }

    #[test]
    fn priority_queue_forwards_heap_behavior(values in prop::collection::vec(-100i32..100, 0..100)) {
        test_queue_forwards_heap_behavior(values)?;
    }
}
