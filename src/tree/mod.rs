//! Height-balanced (AVL) ordered map driven by a caller-supplied comparator.
//!
//! This module provides [`AvlTree`], a mutable ordered map that keeps every
//! node's subtrees within one level of each other.
//!
//! # Overview
//!
//! - O(log N) find / insert / remove / extract
//! - O(log N) min / max and their extracting variants
//! - O(N) in-order and reverse walks with early exit
//! - O(1) len and `is_empty`
//!
//! Keys are ordered exclusively through a [`Comparator`]; the default
//! [`NaturalOrder`] comparator delegates to [`Ord`].
//!
//! # Examples
//!
//! ```rust
//! use avltree::tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(3, "three");
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! assert_eq!(tree.extract_min(), Some((1, "one")));
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants after every public operation:
//! 1. In-order key sequence is strictly increasing under the comparator
//! 2. At every node the subtree heights differ by at most one, and the
//!    node's balance tag records exactly which side (if any) is taller
//! 3. The stored length equals the number of nodes
//!
//! Each node owns its children, so the structure cannot contain cycles.

mod error;
mod insert;
mod node;
mod remove;
mod traversal;
#[cfg(test)]
mod validation;

use std::fmt;

use crate::comparator::{Comparator, NaturalOrder};
use node::{Balance, Link};

pub use error::TreeError;
pub use traversal::{IntoIter, Iter};

// =============================================================================
// Insertion Policy
// =============================================================================

/// What [`AvlTree::insert_with_policy`] does when the key is already present.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum DuplicatePolicy {
    /// Keep the stored value and hand the new one back.
    #[default]
    Keep,
    /// Overwrite the stored value and hand the old one back.
    Replace,
}

/// The result of an insertion.
///
/// No variant involves any restructuring beyond [`Inserted`](Self::Inserted):
/// a duplicate key never triggers a rotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[must_use]
pub enum InsertOutcome<V> {
    /// A new entry was created.
    Inserted,
    /// The key was present; the stored value was kept and the rejected
    /// value is returned.
    Ignored(V),
    /// The key was present; the stored value was overwritten and the
    /// previous value is returned.
    Replaced(V),
}

impl<V> InsertOutcome<V> {
    /// Returns `true` if a new entry was created.
    #[inline]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// Returns the value that did not end up in the tree, if any.
    #[inline]
    pub fn into_displaced(self) -> Option<V> {
        match self {
            Self::Inserted => None,
            Self::Ignored(value) | Self::Replaced(value) => Some(value),
        }
    }
}

// =============================================================================
// AvlTree Definition
// =============================================================================

/// An ordered map implemented as an AVL tree.
///
/// The ordering of keys is defined by the comparator `C`, which must be a
/// strict total order that does not change while the tree holds keys.
///
/// # Time Complexity
///
/// | Operation                     | Complexity   |
/// |-------------------------------|--------------|
/// | `find` / `contains_key`       | O(log N)     |
/// | `insert`                      | O(log N)     |
/// | `remove` / `extract`          | O(log N)     |
/// | `min` / `max`                 | O(log N)     |
/// | `extract_min` / `extract_max` | O(log N)     |
/// | `walk` / `iter`               | O(N)         |
/// | `find_by_value`               | O(N)         |
/// | `copy_from` / `clone`         | O(M log N)   |
/// | `len` / `is_empty`            | O(1)         |
///
/// # Examples
///
/// ```rust
/// use avltree::tree::{AvlTree, InsertOutcome};
///
/// let mut tree = AvlTree::new();
/// assert_eq!(tree.insert("b", 2), InsertOutcome::Inserted);
/// assert_eq!(tree.insert("b", 20), InsertOutcome::Ignored(20));
/// assert_eq!(tree.insert_or_replace("b", 200), InsertOutcome::Replaced(2));
/// assert_eq!(tree.find(&"b"), Some(&200));
/// ```
pub struct AvlTree<K, V, C = NaturalOrder> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
    comparator: C,
}

impl<K, V> AvlTree<K, V, NaturalOrder>
where
    K: Ord,
{
    /// Creates an empty tree ordered by `K`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let tree: AvlTree<i32, String> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> AvlTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_comparator(|left: &String, right: &String| {
    ///     left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    /// });
    /// tree.insert("ccc".to_string(), ());
    /// tree.insert("a".to_string(), ());
    /// assert_eq!(tree.min().map(|(key, _)| key.as_str()), Some("a"));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of entries in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator that orders this tree.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of levels in the tree (0 when empty).
    ///
    /// Follows the balance tags down the taller side, so this is O(log N).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = (0..7).map(|key| (key, ())).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            height += 1;
            node = match current.balance {
                Balance::LeftHeavy => current.left.as_deref(),
                Balance::Balanced | Balance::RightHeavy => current.right.as_deref(),
            };
        }
        height
    }

    /// Removes every entry.
    ///
    /// Nodes are freed children-first. Clearing an empty tree does nothing.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            tracing::trace!(length = self.length, "clearing tree");
            drop(root);
        }
        self.length = 0;
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let tree: AvlTree<i32, &str> = [(3, "three"), (1, "one")].into_iter().collect();
    /// assert_eq!(tree.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// Uses a single descent, rebalancing on the way back up.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, ()> = [5, 3, 8].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(tree.extract_min(), Some((3, ())));
    /// assert_eq!(tree.extract_min(), Some((5, ())));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn extract_min(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, entry, _) = remove::remove_min(root);
        self.root = root;
        self.length -= 1;
        Some(entry)
    }

    /// Removes and returns the entry with the largest key.
    pub fn extract_max(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, entry, _) = remove::remove_max(root);
        self.root = root;
        self.length -= 1;
        Some(entry)
    }

    /// Calls `visitor` for every entry in ascending key order.
    ///
    /// Returning `false` from `visitor` stops the walk, in which case
    /// `walk` returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let tree: AvlTree<i32, i32> = (1..=10).map(|key| (key, key * key)).collect();
    /// let mut sum = 0;
    /// let completed = tree.walk(|_, square| {
    ///     sum += square;
    ///     sum < 20
    /// });
    /// assert!(!completed);
    /// assert_eq!(sum, 30); // 1 + 4 + 9 + 16
    /// ```
    pub fn walk<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        traversal::walk_forward(self.root.as_deref(), &mut visitor)
    }

    /// Calls `visitor` for every entry in descending key order.
    ///
    /// Same early-exit contract as [`walk`](Self::walk).
    pub fn walk_reverse<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        traversal::walk_reverse(self.root.as_deref(), &mut visitor)
    }

    /// Returns a double-ended iterator over entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Finds the first entry, in key order, whose value equals `value`.
    ///
    /// This scans the whole tree and is meant for diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let tree: AvlTree<&str, u32> = [("a", 7), ("b", 9)].into_iter().collect();
    /// assert_eq!(tree.find_by_value(&9), Some((&"b", &9)));
    /// assert_eq!(tree.find_by_value(&1), None);
    /// ```
    #[must_use]
    pub fn find_by_value(&self, value: &V) -> Option<(&K, &V)>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, candidate)| *candidate == value)
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.find(&1), Some(&"one"));
    /// assert_eq!(tree.find(&2), None);
    /// ```
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&V> {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match self.comparator.compare(key, &current.key) {
                std::cmp::Ordering::Less => current.left.as_deref(),
                std::cmp::Ordering::Greater => current.right.as_deref(),
                std::cmp::Ordering::Equal => return Some(&current.value),
            };
        }
        None
    }

    /// Returns a mutable reference to the value stored for `key`.
    #[must_use]
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut node = self.root.as_deref_mut();
        while let Some(current) = node {
            match self.comparator.compare(key, &current.key) {
                std::cmp::Ordering::Less => node = current.left.as_deref_mut(),
                std::cmp::Ordering::Greater => node = current.right.as_deref_mut(),
                std::cmp::Ordering::Equal => return Some(&mut current.value),
            }
        }
        None
    }

    /// Like [`find`](Self::find), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if `key` is absent.
    pub fn try_find(&self, key: &K) -> Result<&V, TreeError> {
        self.find(key).ok_or(TreeError::KeyNotFound)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts an entry, keeping the stored value if `key` is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::{AvlTree, InsertOutcome};
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1, "one").is_inserted());
    /// assert_eq!(tree.insert(1, "uno"), InsertOutcome::Ignored("uno"));
    /// assert_eq!(tree.find(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> InsertOutcome<V> {
        self.insert_with_policy(key, value, DuplicatePolicy::Keep)
    }

    /// Inserts an entry, overwriting the stored value if `key` is already present.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> InsertOutcome<V> {
        self.insert_with_policy(key, value, DuplicatePolicy::Replace)
    }

    /// Inserts an entry, resolving an existing key according to `policy`.
    ///
    /// The length grows by one exactly when the outcome is
    /// [`InsertOutcome::Inserted`].
    ///
    /// # Panics
    ///
    /// A new node is allocated with [`Box::new`], so running out of memory
    /// aborts the process instead of returning an error. The node is
    /// allocated before it is linked, so the tree is never observed
    /// half-linked.
    pub fn insert_with_policy(
        &mut self,
        key: K,
        value: V,
        policy: DuplicatePolicy,
    ) -> InsertOutcome<V> {
        let (root, _, outcome) =
            insert::insert_node(self.root.take(), key, value, policy, &self.comparator);
        self.root = Some(root);
        if outcome.is_inserted() {
            self.length += 1;
        }
        outcome
    }

    /// Removes `key` from the tree, returning `true` if it was present.
    ///
    /// The tree is left untouched when the key is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        self.extract_entry(key).is_some()
    }

    /// Removes `key` from the tree and returns its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.extract(&1), Some("one"));
    /// assert_eq!(tree.extract(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn extract(&mut self, key: &K) -> Option<V> {
        self.extract_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the tree and returns the stored key and value.
    pub fn extract_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (entry, _) = remove::remove_node(&mut self.root, key, &self.comparator)?;
        self.length -= 1;
        Some(entry)
    }

    /// Moves the value stored under `old_key` to `new_key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if `old_key` is absent, or
    /// [`TreeError::DuplicateKey`] if a different entry already uses
    /// `new_key`. The tree is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::{AvlTree, TreeError};
    ///
    /// let mut tree: AvlTree<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(tree.rekey(&1, 5), Ok(()));
    /// assert_eq!(tree.find(&5), Some(&"a"));
    /// assert_eq!(tree.rekey(&5, 2), Err(TreeError::DuplicateKey));
    /// ```
    pub fn rekey(&mut self, old_key: &K, new_key: K) -> Result<(), TreeError> {
        if !self.contains_key(old_key) {
            return Err(TreeError::KeyNotFound);
        }
        if self.comparator.compare(old_key, &new_key) != std::cmp::Ordering::Equal
            && self.contains_key(&new_key)
        {
            return Err(TreeError::DuplicateKey);
        }
        let value = self.extract(old_key).ok_or(TreeError::KeyNotFound)?;
        tracing::trace!(length = self.length, "re-keying tree entry");
        match self.insert(new_key, value) {
            InsertOutcome::Inserted => Ok(()),
            InsertOutcome::Ignored(_) | InsertOutcome::Replaced(_) => Err(TreeError::DuplicateKey),
        }
    }

    /// Inserts a copy of every entry of `other` that is not already present.
    ///
    /// Entries are re-inserted one by one in `other`'s order, so the two
    /// trees never share nodes. Returns the number of entries added.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::tree::AvlTree;
    ///
    /// let mut target: AvlTree<i32, &str> = [(1, "one")].into_iter().collect();
    /// let source: AvlTree<i32, &str> = [(1, "uno"), (2, "dos")].into_iter().collect();
    /// assert_eq!(target.copy_from(&source), 1);
    /// assert_eq!(target.find(&1), Some(&"one"));
    /// assert_eq!(target.find(&2), Some(&"dos"));
    /// ```
    pub fn copy_from<D>(&mut self, other: &AvlTree<K, V, D>) -> usize
    where
        K: Clone,
        V: Clone,
    {
        let before = self.length;
        other.walk(|key, value| {
            let _ = self.insert(key.clone(), value.clone());
            true
        });
        let added = self.length - before;
        tracing::trace!(added, length = self.length, "copied entries into tree");
        added
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for AvlTree<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Clone for AvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::with_comparator(self.comparator.clone());
        tree.copy_from(self);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTree<K, V, C> {
    /// Inserts every pair, later values replacing earlier ones for equal keys.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert_or_replace(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> IntoIterator for AvlTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.length)
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlTree<K, V, C> {
    /// Two trees are equal when they hold the same entries in the same order,
    /// regardless of their internal shape.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlTree<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for AvlTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(AvlTree<i32, String>: Send, Sync, Default);
static_assertions::assert_not_impl_any!(AvlTree<std::rc::Rc<i32>, i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::Reversed;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        let mut tree = AvlTree::new();
        for &key in keys {
            let _ = tree.insert(key, key * 100);
        }
        tree
    }

    fn root_key(tree: &AvlTree<i32, i32>) -> Option<i32> {
        tree.root.as_ref().map(|node| node.key)
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_tree() {
        let tree: AvlTree<i32, String> = AvlTree::new();
        assert_eq!(format!("{tree}"), "{}");
    }

    #[rstest]
    fn test_display_multiple_elements_sorted() {
        let mut tree = AvlTree::new();
        let _ = tree.insert(3, "three");
        let _ = tree.insert(1, "one");
        let _ = tree.insert(2, "two");
        assert_eq!(format!("{tree}"), "{1: one, 2: two, 3: three}");
        assert_eq!(format!("{tree:?}"), r#"{1: "one", 2: "two", 3: "three"}"#);
    }

    // =========================================================================
    // Shape Scenarios
    // =========================================================================

    #[rstest]
    fn test_ascending_inserts_rotate_to_balanced_root() {
        let tree = tree_of(&[1, 2, 3]);
        let root = tree.root.as_ref().map(|node| {
            (
                node.key,
                node.balance,
                node.left.as_ref().map(|left| (left.key, left.balance)),
                node.right.as_ref().map(|right| (right.key, right.balance)),
            )
        });
        assert_eq!(
            root,
            Some((
                2,
                Balance::Balanced,
                Some((1, Balance::Balanced)),
                Some((3, Balance::Balanced))
            ))
        );
    }

    #[rstest]
    fn test_descending_inserts_rotate_to_balanced_root() {
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(root_key(&tree), Some(2));
        assert_eq!(tree.height(), 2);
    }

    #[rstest]
    fn test_delete_root_of_perfect_tree() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(root_key(&tree), Some(4));
        assert!(tree.remove(&4));
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(root_key(&tree), Some(3));
        validation::assert_invariants(&tree);
    }

    #[rstest]
    fn test_extract_min_order() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let mut extracted = Vec::new();
        while let Some((key, _)) = tree.extract_min() {
            extracted.push(key);
            validation::assert_invariants(&tree);
        }
        assert_eq!(extracted, vec![1, 3, 4, 5, 7, 8, 9]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[rstest]
    fn test_extract_max_order() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let mut extracted = Vec::new();
        while let Some((key, _)) = tree.extract_max() {
            extracted.push(key);
            validation::assert_invariants(&tree);
        }
        assert_eq!(extracted, vec![9, 8, 7, 5, 4, 3, 1]);
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(100)]
    fn test_remove_absent_key_keeps_shape(#[case] absent: i32) {
        let mut tree = tree_of(&[10, 20, 30, 40, 50, 25, 35, 5]);
        let before = validation::shape(&tree);
        assert!(!tree.remove(&absent));
        assert_eq!(validation::shape(&tree), before);
        assert_eq!(tree.len(), 8);
    }

    #[rstest]
    #[case(DuplicatePolicy::Keep, 300)]
    #[case(DuplicatePolicy::Replace, -1)]
    fn test_duplicate_insert_keeps_shape(#[case] policy: DuplicatePolicy, #[case] expected: i32) {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        let before = validation::shape(&tree);
        let outcome = tree.insert_with_policy(3, -1, policy);
        assert!(!outcome.is_inserted());
        assert_eq!(validation::shape(&tree), before);
        assert_eq!(tree.find(&3), Some(&expected));
        assert_eq!(tree.len(), 4);
    }

    // =========================================================================
    // Public Operation Tests
    // =========================================================================

    #[rstest]
    fn test_empty_tree_operations() {
        let mut tree: AvlTree<i32, i32> = AvlTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.extract_min(), None);
        assert_eq!(tree.extract_max(), None);
        assert!(!tree.remove(&1));
        assert_eq!(tree.height(), 0);
        assert!(tree.walk(|_, _| false));
    }

    #[rstest]
    fn test_find_mut_updates_value() {
        let mut tree = tree_of(&[1, 2, 3]);
        if let Some(value) = tree.find_mut(&2) {
            *value = 7;
        }
        assert_eq!(tree.find(&2), Some(&7));
        assert_eq!(tree.find_mut(&9), None);
    }

    #[rstest]
    fn test_try_find() {
        let tree = tree_of(&[1]);
        assert_eq!(tree.try_find(&1), Ok(&100));
        assert_eq!(tree.try_find(&2), Err(TreeError::KeyNotFound));
    }

    #[rstest]
    fn test_rekey_missing_key_leaves_tree_alone() {
        let mut tree = tree_of(&[1, 2]);
        assert_eq!(tree.rekey(&3, 4), Err(TreeError::KeyNotFound));
        assert_eq!(tree.len(), 2);
    }

    #[rstest]
    fn test_rekey_to_same_key() {
        let mut tree = tree_of(&[1, 2]);
        assert_eq!(tree.rekey(&2, 2), Ok(()));
        assert_eq!(tree.find(&2), Some(&200));
        assert_eq!(tree.len(), 2);
    }

    #[rstest]
    fn test_clear_is_idempotent() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.clear();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root_key_for_test(), None);
        let _ = tree.insert(4, 400);
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original = tree_of(&[1, 2, 3]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert!(copy.remove(&2));
        assert_eq!(original.len(), 3);
        assert_eq!(copy.len(), 2);
    }

    #[rstest]
    fn test_reversed_comparator_orders_descending() {
        let mut tree = AvlTree::with_comparator(Reversed(NaturalOrder));
        for key in 1..=5 {
            let _ = tree.insert(key, ());
        }
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
        assert_eq!(tree.min(), Some((&5, &())));
        validation::assert_invariants(&tree);
    }

    #[rstest]
    fn test_height_stays_logarithmic() {
        let tree: AvlTree<i32, ()> = (0..1024).map(|key| (key, ())).collect();
        assert_eq!(tree.height(), validation::height(tree.root.as_deref()));
        // 1.44 * log2(1026) is just under 15
        assert!(tree.height() <= 14);
    }

    #[rstest]
    fn test_insert_outcome_helpers() {
        assert!(InsertOutcome::<i32>::Inserted.is_inserted());
        assert_eq!(InsertOutcome::<i32>::Inserted.into_displaced(), None);
        assert_eq!(InsertOutcome::Ignored(1).into_displaced(), Some(1));
        assert_eq!(InsertOutcome::Replaced(2).into_displaced(), Some(2));
    }

    impl<K: Copy, V, C> AvlTree<K, V, C> {
        fn root_key_for_test(&self) -> Option<K> {
            self.root.as_ref().map(|node| node.key)
        }
    }
}
