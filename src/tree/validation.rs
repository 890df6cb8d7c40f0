//! Structural checks that recompute every invariant from scratch.
//!
//! Nothing here trusts the balance tags: heights are measured by walking
//! the whole subtree.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::AvlTree;
use super::node::{Balance, Node};
use crate::comparator::Comparator;

/// Measures the height of a subtree by full traversal.
pub(super) fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| {
        1 + height(node.left.as_deref()).max(height(node.right.as_deref()))
    })
}

/// Pre-order snapshot of `(key, balance, depth)` used to compare shapes.
pub(super) fn shape<K: Clone, V, C>(tree: &AvlTree<K, V, C>) -> Vec<(K, Balance, usize)> {
    fn collect<K: Clone, V>(
        node: Option<&Node<K, V>>,
        depth: usize,
        out: &mut Vec<(K, Balance, usize)>,
    ) {
        if let Some(node) = node {
            out.push((node.key.clone(), node.balance, depth));
            collect(node.left.as_deref(), depth + 1, out);
            collect(node.right.as_deref(), depth + 1, out);
        }
    }
    let mut out = Vec::new();
    collect(tree.root.as_deref(), 0, &mut out);
    out
}

/// Checks a subtree and returns `(height, node count)`.
fn check<K: Debug, V, C: Comparator<K>>(node: Option<&Node<K, V>>, comparator: &C) -> (usize, usize) {
    let Some(node) = node else {
        return (0, 0);
    };
    if let Some(left) = node.left.as_deref() {
        assert_eq!(
            comparator.compare(&left.key, &node.key),
            Ordering::Less,
            "left child {:?} not below {:?}",
            left.key,
            node.key
        );
    }
    if let Some(right) = node.right.as_deref() {
        assert_eq!(
            comparator.compare(&right.key, &node.key),
            Ordering::Greater,
            "right child {:?} not above {:?}",
            right.key,
            node.key
        );
    }
    let (left_height, left_count) = check(node.left.as_deref(), comparator);
    let (right_height, right_count) = check(node.right.as_deref(), comparator);
    let expected = match left_height.cmp(&right_height) {
        Ordering::Greater => Balance::LeftHeavy,
        Ordering::Equal => Balance::Balanced,
        Ordering::Less => Balance::RightHeavy,
    };
    assert!(
        left_height.abs_diff(right_height) <= 1,
        "subtree heights {left_height} and {right_height} differ by more than one at {:?}",
        node.key
    );
    assert_eq!(node.balance, expected, "stale balance tag at {:?}", node.key);
    (
        1 + left_height.max(right_height),
        1 + left_count + right_count,
    )
}

/// Panics unless ordering, balance and length invariants all hold.
pub(super) fn assert_invariants<K: Debug, V, C: Comparator<K>>(tree: &AvlTree<K, V, C>) {
    let (measured, count) = check(tree.root.as_deref(), &tree.comparator);
    assert_eq!(count, tree.len(), "stored length disagrees with node count");
    assert_eq!(tree.height(), measured, "tag-derived height disagrees");

    let keys: Vec<&K> = tree.keys().collect();
    for pair in keys.windows(2) {
        assert_eq!(
            tree.comparator.compare(pair[0], pair[1]),
            Ordering::Less,
            "in-order keys {:?} and {:?} out of order",
            pair[0],
            pair[1]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{NaturalOrder, Reversed};
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(i16),
        Replace(i16),
        Remove(i16),
        ExtractMin,
        ExtractMax,
    }

    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            4 => any::<i16>().prop_map(|key| Operation::Insert(key % 64)),
            1 => any::<i16>().prop_map(|key| Operation::Replace(key % 64)),
            3 => any::<i16>().prop_map(|key| Operation::Remove(key % 64)),
            1 => Just(Operation::ExtractMin),
            1 => Just(Operation::ExtractMax),
        ]
    }

    fn apply<C: Comparator<i16>>(tree: &mut AvlTree<i16, i32, C>, operation: &Operation) {
        match *operation {
            Operation::Insert(key) => {
                let _ = tree.insert(key, i32::from(key));
            }
            Operation::Replace(key) => {
                let _ = tree.insert_or_replace(key, -i32::from(key));
            }
            Operation::Remove(key) => {
                let _ = tree.remove(&key);
            }
            Operation::ExtractMin => {
                let _ = tree.extract_min();
            }
            Operation::ExtractMax => {
                let _ = tree.extract_max();
            }
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_operation(
            operations in prop::collection::vec(operation(), 0..200)
        ) {
            let mut tree = AvlTree::new();
            for operation in &operations {
                apply(&mut tree, operation);
                assert_invariants(&tree);
            }
        }

        #[test]
        fn prop_invariants_hold_under_reversed_order(
            operations in prop::collection::vec(operation(), 0..200)
        ) {
            let mut tree = AvlTree::with_comparator(Reversed(NaturalOrder));
            for operation in &operations {
                apply(&mut tree, operation);
                assert_invariants(&tree);
            }
        }

        #[test]
        fn prop_height_is_logarithmic(keys in prop::collection::vec(any::<i32>(), 1..500)) {
            let tree: AvlTree<i32, ()> = keys.into_iter().map(|key| (key, ())).collect();
            let bound = 1.45 * ((tree.len() + 2) as f64).log2();
            prop_assert!((height(tree.root.as_deref()) as f64) <= bound);
        }

        #[test]
        fn prop_extract_insert_round_trip_keeps_invariants(
            keys in prop::collection::vec(any::<i16>(), 1..200),
            pick: prop::sample::Index
        ) {
            let mut tree = AvlTree::new();
            for key in keys {
                let _ = tree.insert(key, i32::from(key) * 3);
            }
            let before: Vec<(i16, i32)> = tree.iter().map(|(key, value)| (*key, *value)).collect();
            let (key, value) = before[pick.index(before.len())];

            prop_assert_eq!(tree.extract(&key), Some(value));
            assert_invariants(&tree);
            prop_assert!(tree.insert(key, value).is_inserted());
            assert_invariants(&tree);

            let after: Vec<(i16, i32)> = tree.iter().map(|(key, value)| (*key, *value)).collect();
            prop_assert_eq!(after, before);
        }

        #[test]
        fn prop_remove_absent_keeps_shape(
            keys in prop::collection::vec(0..100i32, 0..50),
            absent in 100..200i32
        ) {
            let mut tree: AvlTree<i32, ()> = keys.into_iter().map(|key| (key, ())).collect();
            let before = shape(&tree);
            prop_assert!(!tree.remove(&absent));
            prop_assert_eq!(shape(&tree), before);
        }
    }
}
