//! Removal, extraction and min/max splicing.
//!
//! A node with two children is not unlinked directly: the maximum of its
//! left subtree is spliced out instead and its entry moves into the node.

use std::cmp::Ordering;

use super::node::{HeightChange, Link, Node};
use crate::comparator::Comparator;

/// Removes the entry for `key` from the subtree owned by `link`.
///
/// Returns `None` without touching the subtree (shape and balance tags
/// included) when the key is absent.
pub(super) fn remove_node<K, V, C>(
    link: &mut Link<K, V>,
    key: &K,
    comparator: &C,
) -> Option<((K, V), HeightChange)>
where
    C: Comparator<K> + ?Sized,
{
    let node = link.as_mut()?;
    match comparator.compare(key, &node.key) {
        Ordering::Less => {
            let (entry, change) = remove_node(&mut node.left, key, comparator)?;
            let change = if change == HeightChange::Shrank {
                rebalance(link, Node::left_shrank)
            } else {
                HeightChange::Unchanged
            };
            Some((entry, change))
        }
        Ordering::Greater => {
            let (entry, change) = remove_node(&mut node.right, key, comparator)?;
            let change = if change == HeightChange::Shrank {
                rebalance(link, Node::right_shrank)
            } else {
                HeightChange::Unchanged
            };
            Some((entry, change))
        }
        Ordering::Equal => {
            let node = link.take()?;
            let (entry, change, replacement) = unlink(node);
            *link = replacement;
            Some((entry, change))
        }
    }
}

/// Detaches `node` from its subtree and returns its entry plus the subtree
/// that takes its place.
fn unlink<K, V>(mut node: Box<Node<K, V>>) -> ((K, V), HeightChange, Link<K, V>) {
    match (node.left.take(), node.right.take()) {
        (None, only) | (only, None) => {
            let (entry, _, _) = (*node).into_parts();
            (entry, HeightChange::Shrank, only)
        }
        (Some(left), right) => {
            let (left, (max_key, max_value), change) = remove_max(left);
            node.left = left;
            node.right = right;
            let key = std::mem::replace(&mut node.key, max_key);
            let value = std::mem::replace(&mut node.value, max_value);
            let (node, change) = if change == HeightChange::Shrank {
                node.left_shrank()
            } else {
                (node, HeightChange::Unchanged)
            };
            ((key, value), change, Some(node))
        }
    }
}

/// Splices the leftmost node out of the subtree rooted at `node`.
pub(super) fn remove_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, (K, V), HeightChange) {
    match node.left.take() {
        Some(left) => {
            let (left, entry, change) = remove_min(left);
            node.left = left;
            if change == HeightChange::Shrank {
                let (node, change) = node.left_shrank();
                return (Some(node), entry, change);
            }
            (Some(node), entry, HeightChange::Unchanged)
        }
        None => {
            let (entry, _, right) = (*node).into_parts();
            (right, entry, HeightChange::Shrank)
        }
    }
}

/// Splices the rightmost node out of the subtree rooted at `node`.
pub(super) fn remove_max<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, (K, V), HeightChange) {
    match node.right.take() {
        Some(right) => {
            let (right, entry, change) = remove_max(right);
            node.right = right;
            if change == HeightChange::Shrank {
                let (node, change) = node.right_shrank();
                return (Some(node), entry, change);
            }
            (Some(node), entry, HeightChange::Unchanged)
        }
        None => {
            let (entry, left, _) = (*node).into_parts();
            (left, entry, HeightChange::Shrank)
        }
    }
}

/// Applies a balance-table update to the node owned by `link`.
fn rebalance<K, V>(
    link: &mut Link<K, V>,
    update: fn(Box<Node<K, V>>) -> (Box<Node<K, V>>, HeightChange),
) -> HeightChange {
    let Some(node) = link.take() else {
        return HeightChange::Unchanged;
    };
    let (node, change) = update(node);
    *link = Some(node);
    change
}
