//! Indexed binary min-heap
//!
//! A binary min-heap backed by a dense `Vec`, augmented with a reverse
//! index from key to the set of array positions currently holding that key.
//! The index is what turns removal-by-value from a linear scan into an
//! O(log n) operation, and makes membership tests O(1).
//!
//! Duplicate keys are supported: the index stores a small *set of
//! positions* per key, so equal keys can coexist and be removed one
//! occurrence at a time.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity |
//! |------------|------------|
//! | `insert`   | O(log n)   |
//! | `poll`     | O(log n)   |
//! | `remove`   | O(log n)   |
//! | `peek`     | O(1)       |
//! | `contains` | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use classic_collections::IndexedMinHeap;
//!
//! let mut heap = IndexedMinHeap::new();
//! heap.insert(3);
//! heap.insert(1);
//! heap.insert(2);
//!
//! assert_eq!(heap.peek(), Ok(1));
//! assert_eq!(heap.poll(), Ok(1));
//! assert_eq!(heap.remove(3), Ok(3));
//! assert_eq!(heap.len(), 1);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap contains no elements
    Empty,
    /// The key has no occurrence in the heap
    NotFound,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::NotFound => write!(f, "key is not in heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Positions are stored inline while a key has few occurrences, which is
/// the overwhelmingly common case.
type PositionSet = SmallVec<[usize; 4]>;

/// A binary min-heap with a reverse position index
///
/// The heap stores keys in a `Vec` interpreted as a complete binary tree
/// (parent of `i` is `(i - 1) / 2`, children are `2i + 1` and `2i + 2`).
/// Alongside it, a hash map records every array position holding a given
/// key. Both structures are mutated together by every operation; neither
/// is ever updated alone.
///
/// Keys are intended to be plain numeric values: ordering is the type's
/// natural `Ord` and there is no comparator hook.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K> {
    items: Vec<K>,
    positions: FxHashMap<K, PositionSet>,
}

impl<K: Ord + Hash + Copy> Default for IndexedMinHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Hash + Copy> IndexedMinHeap<K> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts a key into the heap
    ///
    /// The key is appended at the end of the array, recorded in the
    /// position index, and bubbled toward the root while it is strictly
    /// smaller than its parent.
    pub fn insert(&mut self, key: K) {
        self.items.push(key);
        let position = self.items.len() - 1;
        self.record_position(key, position);
        self.sift_up(position);
    }

    /// Returns the smallest key without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn peek(&self) -> Result<K, HeapError> {
        self.items.first().copied().ok_or(HeapError::Empty)
    }

    /// Removes and returns the smallest key
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn poll(&mut self) -> Result<K, HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }
        Ok(self.remove_at(0))
    }

    /// Removes one occurrence of `key` and returns it
    ///
    /// When the key occurs more than once, the occurrence removed is the
    /// one at the most recently recorded position for that key. Which
    /// physical occurrence that is depends on the heap's swap history and
    /// is not a caller-visible choice.
    ///
    /// The vacated slot is refilled with the last array element, which is
    /// then sifted *downward only*. A replacement smaller than its new
    /// parent is left in place, so removing from the middle of the heap
    /// can leave a heap-order violation. Callers observe the layout
    /// through [`Self::as_slice`] and depend on it, so the behavior is
    /// kept as is; `removing_mid_heap_can_break_heap_order` in this
    /// module's tests pins the exact post-state.
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if no occurrence of `key` is in
    /// the heap.
    pub fn remove(&mut self, key: K) -> Result<K, HeapError> {
        let position = self
            .positions
            .get(&key)
            .and_then(|set| set.last().copied())
            .ok_or(HeapError::NotFound)?;
        Ok(self.remove_at(position))
    }

    /// Returns true if at least one occurrence of `key` is in the heap
    pub fn contains(&self, key: K) -> bool {
        self.positions.get(&key).is_some_and(|set| !set.is_empty())
    }

    /// Iterates over `(position, key)` pairs in array order
    ///
    /// This is a snapshot of the backing array, *not* a sorted traversal;
    /// only the first element is guaranteed to be the minimum.
    pub fn iter(&self) -> impl Iterator<Item = (usize, K)> + '_ {
        self.items.iter().copied().enumerate()
    }

    /// Returns the backing array as a slice, in heap order
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    /// Removes the element at `position` and returns it.
    ///
    /// Shared by `poll` (position 0) and `remove` (an indexed position).
    /// The caller guarantees `position < self.items.len()`.
    fn remove_at(&mut self, position: usize) -> K {
        let removed = self.items[position];
        self.erase_position(removed, position);

        let last = self.items.len() - 1;
        if position == last {
            // Removing the final slot needs no relocation.
            self.items.truncate(last);
            return removed;
        }

        let moved = self.items[last];
        self.items[position] = moved;
        self.items.truncate(last);
        self.erase_position(moved, last);
        self.record_position(moved, position);
        self.sift_down(position);
        removed
    }

    /// Moves the element at `index` toward the root while it is strictly
    /// smaller than its parent.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] < self.items[parent] {
                self.swap_positions(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the element at `index` toward the leaves while one of its
    /// children is smaller.
    ///
    /// Tie-break: the left child wins when it is strictly smaller than
    /// both the current element and the right child; otherwise the right
    /// child is taken when it is smaller than the current element. The
    /// clamped child lookup turns missing children into self-comparisons,
    /// which can never swap, so leaves terminate the loop naturally.
    fn sift_down(&mut self, mut index: usize) {
        loop {
            let (left, right) = self.children_of(index);
            if self.items[left] < self.items[index] && self.items[left] < self.items[right] {
                self.swap_positions(index, left);
                index = left;
            } else if self.items[right] < self.items[index] {
                self.swap_positions(index, right);
                index = right;
            } else {
                break;
            }
        }
    }

    /// Returns `(left, right)` child indexes of `index`, substituting
    /// `index` itself for any child that falls outside the array.
    fn children_of(&self, index: usize) -> (usize, usize) {
        let left = 2 * index + 1;
        let right = 2 * index + 2;
        if left >= self.items.len() {
            (index, index)
        } else if right >= self.items.len() {
            (left, index)
        } else {
            (left, right)
        }
    }

    /// Exchanges the keys at `upper` and `lower` and repairs the position
    /// index for both.
    ///
    /// The index is re-recorded upper-slot-first; `remove` picks a key's
    /// most recently recorded position, so this order is observable and
    /// must not change.
    fn swap_positions(&mut self, upper: usize, lower: usize) {
        let upper_key = self.items[upper];
        let lower_key = self.items[lower];
        self.items.swap(upper, lower);
        self.erase_position(upper_key, upper);
        self.erase_position(lower_key, lower);
        self.record_position(upper_key, lower);
        self.record_position(lower_key, upper);
    }

    /// Adds `position` to the position set for `key`.
    fn record_position(&mut self, key: K, position: usize) {
        self.positions.entry(key).or_default().push(position);
    }

    /// Drops `position` from the position set for `key`, removing the map
    /// entry entirely once the set is empty.
    fn erase_position(&mut self, key: K, position: usize) {
        if let Some(set) = self.positions.get_mut(&key) {
            set.retain(|&mut p| p != position);
            if set.is_empty() {
                self.positions.remove(&key);
            }
        }
    }
}
