//! AVL tree
//!
//! A self-balancing binary search tree over owned `Box` nodes. Every node
//! caches its height and balance factor (right height minus left height);
//! inserts and removals rebalance on the way back up with the four
//! classic rotation cases. Duplicate keys are ignored.
//!
//! # Example
//!
//! ```rust
//! use classic_collections::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [3, 4, 5] {
//!     tree.add(key);
//! }
//! assert!(tree.contains(&4));
//! assert_eq!(tree.len(), 3);
//!
//! let mut sorted = Vec::new();
//! tree.in_order(|key| sorted.push(*key));
//! assert_eq!(sorted, vec![3, 4, 5]);
//! ```

use std::cmp::Ordering;

use crate::queue::Queue;

#[derive(Debug)]
struct AvlNode<K> {
    key: K,
    height: i32,
    balance: i32,
    left: Option<Box<AvlNode<K>>>,
    right: Option<Box<AvlNode<K>>>,
}

impl<K> AvlNode<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(AvlNode {
            key,
            height: 0,
            balance: 0,
            left: None,
            right: None,
        })
    }

    /// Recomputes the cached height and balance factor from the children.
    /// A missing child counts as height -1.
    fn update(&mut self) {
        let left_height = self.left.as_ref().map_or(-1, |n| n.height);
        let right_height = self.right.as_ref().map_or(-1, |n| n.height);
        self.balance = right_height - left_height;
        self.height = 1 + left_height.max(right_height);
    }
}

/// A self-balancing binary search tree
#[derive(Debug)]
pub struct AvlTree<K> {
    root: Option<Box<AvlNode<K>>>,
    len: usize,
}

impl<K: Ord> AvlTree<K> {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a key to the tree, returning true if it was inserted
    ///
    /// Duplicate keys are ignored and do not count toward `len`.
    pub fn add(&mut self, key: K) -> bool {
        let mut added = false;
        self.root = Some(Self::insert(self.root.take(), key, &mut added));
        if added {
            self.len += 1;
        }
        added
    }

    /// Returns true if `key` is in the tree
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
                Ordering::Less => node.left.as_deref(),
            };
        }
        false
    }

    /// Removes a key from the tree, returning true if it was present
    pub fn remove(&mut self, key: &K) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.root = Self::remove_key(self.root.take(), key);
        self.len -= 1;
        true
    }

    /// Visits every key root-left-right
    pub fn pre_order<F: FnMut(&K)>(&self, mut f: F) {
        Self::walk_pre(self.root.as_deref(), &mut f);
    }

    /// Visits every key left-root-right, i.e. in ascending order
    pub fn in_order<F: FnMut(&K)>(&self, mut f: F) {
        Self::walk_in(self.root.as_deref(), &mut f);
    }

    /// Visits every key left-right-root
    pub fn post_order<F: FnMut(&K)>(&self, mut f: F) {
        Self::walk_post(self.root.as_deref(), &mut f);
    }

    /// Visits every key level by level, top to bottom
    pub fn level_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut queue = Queue::new();
        if let Some(root) = self.root.as_deref() {
            queue.enqueue(root);
        }
        while let Some(node) = queue.dequeue() {
            f(&node.key);
            if let Some(left) = node.left.as_deref() {
                queue.enqueue(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.enqueue(right);
            }
        }
    }

    fn insert(node: Option<Box<AvlNode<K>>>, key: K, added: &mut bool) -> Box<AvlNode<K>> {
        let mut node = match node {
            None => {
                *added = true;
                return AvlNode::new(key);
            }
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Equal => return node,
            Ordering::Greater => node.right = Some(Self::insert(node.right.take(), key, added)),
            Ordering::Less => node.left = Some(Self::insert(node.left.take(), key, added)),
        }
        node.update();
        Self::rebalance(node)
    }

    fn remove_key(node: Option<Box<AvlNode<K>>>, key: &K) -> Option<Box<AvlNode<K>>> {
        let mut node = node?;
        match key.cmp(&node.key) {
            Ordering::Greater => node.right = Self::remove_key(node.right.take(), key),
            Ordering::Less => node.left = Self::remove_key(node.left.take(), key),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (Some(left), Some(right)) => {
                    // Replace from the taller subtree to keep the
                    // rebalancing work small.
                    if left.height > right.height {
                        let (rest, predecessor) = Self::take_max(left);
                        node.key = predecessor;
                        node.left = rest;
                        node.right = Some(right);
                    } else {
                        let (rest, successor) = Self::take_min(right);
                        node.key = successor;
                        node.left = Some(left);
                        node.right = rest;
                    }
                }
            },
        }
        node.update();
        Some(Self::rebalance(node))
    }

    /// Detaches the smallest key of a subtree, rebalancing the path down
    /// to it, and returns the remaining subtree alongside the key.
    fn take_min(mut node: Box<AvlNode<K>>) -> (Option<Box<AvlNode<K>>>, K) {
        match node.left.take() {
            None => (node.right.take(), node.key),
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                node.update();
                (Some(Self::rebalance(node)), min)
            }
        }
    }

    /// Mirror of [`Self::take_min`] for the largest key.
    fn take_max(mut node: Box<AvlNode<K>>) -> (Option<Box<AvlNode<K>>>, K) {
        match node.right.take() {
            None => (node.left.take(), node.key),
            Some(right) => {
                let (rest, max) = Self::take_max(right);
                node.right = rest;
                node.update();
                (Some(Self::rebalance(node)), max)
            }
        }
    }

    /// Restores the AVL invariant at `node` when its balance factor has
    /// drifted to +/-2; the four rotation cases are selected by the
    /// heavier child's own balance factor.
    fn rebalance(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
        if node.balance == -2 {
            if node.left.as_ref().map_or(0, |n| n.balance) <= 0 {
                Self::rotate_right(node)
            } else {
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
        } else if node.balance == 2 {
            if node.right.as_ref().map_or(0, |n| n.balance) >= 0 {
                Self::rotate_left(node)
            } else {
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
        } else {
            node
        }
    }

    fn rotate_right(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
        let mut pivot = match node.left.take() {
            Some(pivot) => pivot,
            None => unreachable!("right rotation requires a left child"),
        };
        node.left = pivot.right.take();
        node.update();
        pivot.right = Some(node);
        pivot.update();
        pivot
    }

    fn rotate_left(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
        let mut pivot = match node.right.take() {
            Some(pivot) => pivot,
            None => unreachable!("left rotation requires a right child"),
        };
        node.right = pivot.left.take();
        node.update();
        pivot.left = Some(node);
        pivot.update();
        pivot
    }

    fn walk_pre(node: Option<&AvlNode<K>>, f: &mut impl FnMut(&K)) {
        if let Some(node) = node {
            f(&node.key);
            Self::walk_pre(node.left.as_deref(), f);
            Self::walk_pre(node.right.as_deref(), f);
        }
    }

    fn walk_in(node: Option<&AvlNode<K>>, f: &mut impl FnMut(&K)) {
        if let Some(node) = node {
            Self::walk_in(node.left.as_deref(), f);
            f(&node.key);
            Self::walk_in(node.right.as_deref(), f);
        }
    }

    fn walk_post(node: Option<&AvlNode<K>>, f: &mut impl FnMut(&K)) {
        if let Some(node) = node {
            Self::walk_post(node.left.as_deref(), f);
            Self::walk_post(node.right.as_deref(), f);
            f(&node.key);
        }
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}
