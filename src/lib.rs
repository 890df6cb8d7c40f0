//! # avltree
//!
//! A height-balanced (AVL) ordered map whose ordering is supplied by the
//! caller instead of being taken from [`Ord`].
//!
//! ## Overview
//!
//! - **Comparators**: any `Fn(&K, &K) -> Ordering` closure, a natural-order
//!   comparator, a reversing adaptor, and context-carrying function pointers.
//! - **Tree**: [`AvlTree`](tree::AvlTree) with insert / find / remove /
//!   extract, min / max extraction, in-order and reverse walks, and
//!   double-ended iteration.
//! - **Pool**: a fixed-capacity object pool that uses the tree to map
//!   allocation keys to slot indices.
//!
//! ## Feature Flags
//!
//! - `pool`: Object pool built on top of the tree (enabled by default)
//!
//! ## Example
//!
//! ```rust
//! use avltree::prelude::*;
//!
//! let mut tree = AvlTree::with_comparator(|left: &i32, right: &i32| right.cmp(left));
//! tree.insert(1, "one");
//! tree.insert(3, "three");
//! tree.insert(2, "two");
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&3, &2, &1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use avltree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::*;

    pub use crate::tree::*;

    #[cfg(feature = "pool")]
    pub use crate::pool::*;
}

pub mod comparator;

pub mod tree;

#[cfg(feature = "pool")]
pub mod pool;
