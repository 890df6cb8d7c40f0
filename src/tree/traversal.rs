//! In-order walks and iterators.

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Inline capacity of the iterator stacks.
///
/// An AVL tree of height 32 holds millions of entries, so the stacks
/// practically never spill to the heap.
const INLINE_DEPTH: usize = 32;

type NodeStack<'a, K, V> = SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>;

// =============================================================================
// Walks
// =============================================================================

/// Visits the subtree in ascending order until `visitor` returns `false`.
pub(super) fn walk_forward<K, V, F>(node: Option<&Node<K, V>>, visitor: &mut F) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    let Some(node) = node else {
        return true;
    };
    walk_forward(node.left.as_deref(), visitor)
        && visitor(&node.key, &node.value)
        && walk_forward(node.right.as_deref(), visitor)
}

/// Visits the subtree in descending order until `visitor` returns `false`.
pub(super) fn walk_reverse<K, V, F>(node: Option<&Node<K, V>>, visitor: &mut F) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    let Some(node) = node else {
        return true;
    };
    walk_reverse(node.right.as_deref(), visitor)
        && visitor(&node.key, &node.value)
        && walk_reverse(node.left.as_deref(), visitor)
}

/// Moves every entry of the subtree into `entries` in ascending order.
pub(super) fn drain_in_order<K, V>(link: Link<K, V>, entries: &mut Vec<(K, V)>) {
    if let Some(node) = link {
        let (entry, left, right) = (*node).into_parts();
        drain_in_order(left, entries);
        entries.push(entry);
        drain_in_order(right, entries);
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of an [`AvlTree`](super::AvlTree) in key order.
///
/// Created by [`AvlTree::iter`](super::AvlTree::iter). It can be consumed
/// from both ends.
pub struct Iter<'a, K, V> {
    front: NodeStack<'a, K, V>,
    back: NodeStack<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator.push_right_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.front.push(current);
            node = current.left.as_deref();
        }
    }

    fn push_right_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.back.push(current);
            node = current.right.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_right_spine(node.left.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the entries of an [`AvlTree`](super::AvlTree) in key order.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut entries = Vec::with_capacity(length);
        drain_in_order(root, &mut entries);
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> std::iter::FusedIterator for IntoIter<K, V> {}

// =============================================================================
// Tests
// =============================================================================
