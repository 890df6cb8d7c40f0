//! Recursive insertion with bottom-up rebalancing.

use std::cmp::Ordering;

use super::node::{HeightChange, Link, Node};
use super::{DuplicatePolicy, InsertOutcome};
use crate::comparator::Comparator;

/// Inserts `key` into the subtree owned by `link`.
///
/// Returns the new subtree root, how the subtree height changed, and what
/// happened to the entry. A duplicate key never changes the shape of the
/// subtree.
pub(super) fn insert_node<K, V, C>(
    link: Link<K, V>,
    key: K,
    value: V,
    policy: DuplicatePolicy,
    comparator: &C,
) -> (Box<Node<K, V>>, HeightChange, InsertOutcome<V>)
where
    C: Comparator<K> + ?Sized,
{
    let Some(mut node) = link else {
        return (
            Node::leaf(key, value),
            HeightChange::Grew,
            InsertOutcome::Inserted,
        );
    };

    match comparator.compare(&key, &node.key) {
        Ordering::Less => {
            let (left, change, outcome) =
                insert_node(node.left.take(), key, value, policy, comparator);
            node.left = Some(left);
            if change == HeightChange::Grew {
                let (node, change) = node.left_grew();
                return (node, change, outcome);
            }
            (node, HeightChange::Unchanged, outcome)
        }
        Ordering::Greater => {
            let (right, change, outcome) =
                insert_node(node.right.take(), key, value, policy, comparator);
            node.right = Some(right);
            if change == HeightChange::Grew {
                let (node, change) = node.right_grew();
                return (node, change, outcome);
            }
            (node, HeightChange::Unchanged, outcome)
        }
        Ordering::Equal => {
            let outcome = match policy {
                DuplicatePolicy::Keep => InsertOutcome::Ignored(value),
                DuplicatePolicy::Replace => {
                    InsertOutcome::Replaced(std::mem::replace(&mut node.value, value))
                }
            };
            (node, HeightChange::Unchanged, outcome)
        }
    }
}
