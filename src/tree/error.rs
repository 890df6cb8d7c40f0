//! Error type for fallible tree lookups and re-keying.
//!
//! Ordinary outcomes such as a missing key on [`AvlTree::find`](super::AvlTree::find)
//! or a duplicate on [`AvlTree::insert`](super::AvlTree::insert) are plain
//! values. [`TreeError`] is only produced by the operations that promise a
//! result, like [`AvlTree::try_find`](super::AvlTree::try_find) and
//! [`AvlTree::rekey`](super::AvlTree::rekey).

/// Represents errors that can occur when an operation requires a key to be
/// present (or absent).
///
/// # Examples
///
/// ```rust
/// use avltree::tree::{AvlTree, TreeError};
///
/// let tree: AvlTree<i32, &str> = AvlTree::new();
/// assert_eq!(tree.try_find(&1), Err(TreeError::KeyNotFound));
/// assert_eq!(format!("{}", TreeError::KeyNotFound), "key not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The requested key is not stored in the tree.
    KeyNotFound,
    /// The target key is already stored in the tree.
    DuplicateKey,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found"),
            Self::DuplicateKey => write!(formatter, "key already present"),
        }
    }
}

impl std::error::Error for TreeError {}
