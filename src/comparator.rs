//! Three-way comparators that define key order for [`AvlTree`](crate::tree::AvlTree).
//!
//! The tree never consults [`Ord`] directly. Every ordering decision goes
//! through a [`Comparator`], which must be a strict total order that stays
//! consistent for as long as the tree holds keys.
//!
//! # Examples
//!
//! ```rust
//! use avltree::comparator::{Comparator, NaturalOrder, Reversed, ThreeWay};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! // A C-style comparator returning a sign
//! let by_sign = ThreeWay(|left: &i64, right: &i64| (left - right).signum() as i32);
//! assert_eq!(by_sign.compare(&7, &7), Ordering::Equal);
//! ```

use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Comparator Trait
// =============================================================================

/// A three-way comparison over keys of type `K`.
///
/// Implementations return [`Ordering::Less`] when `left` sorts before
/// `right`, [`Ordering::Greater`] when it sorts after, and
/// [`Ordering::Equal`] when both denote the same key.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator, so state that a
/// comparison needs is simply captured by the closure.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}

// =============================================================================
// Provided Comparators
// =============================================================================

/// Orders keys by their [`Ord`] implementation.
///
/// This is the default comparator of [`AvlTree`](crate::tree::AvlTree).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts the order of the wrapped comparator.
///
/// # Examples
///
/// ```rust
/// use avltree::comparator::{NaturalOrder, Reversed};
/// use avltree::tree::AvlTree;
///
/// let tree: AvlTree<i32, (), _> =
///     [(1, ()), (2, ()), (3, ())].into_iter().fold(
///         AvlTree::with_comparator(Reversed(NaturalOrder)),
///         |mut tree, (key, value)| {
///             tree.insert(key, value);
///             tree
///         },
///     );
/// assert_eq!(tree.min().map(|(key, _)| *key), Some(3));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self.0.compare(right, left)
    }
}

/// Adapts a function that returns a signed integer into a comparator.
///
/// Negative means "less", zero means "equal" and positive means "greater".
/// Only the sign of the result is used.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreeWay<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for ThreeWay<F>
where
    F: Fn(&K, &K) -> i32,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.0)(left, right).cmp(&0)
    }
}

/// A comparison function paired with an explicit context value.
///
/// The context is handed to every call, which lets a plain `fn` pointer
/// compare keys using external data such as a lookup table.
///
/// # Examples
///
/// ```rust
/// use avltree::comparator::{Comparator, WithContext};
/// use std::cmp::Ordering;
///
/// // Order slot ids by the priority stored for them in a table.
/// fn by_priority(priorities: &Vec<u8>, left: &usize, right: &usize) -> Ordering {
///     priorities[*left].cmp(&priorities[*right]).then(left.cmp(right))
/// }
///
/// let comparator = WithContext::new(vec![9, 1, 5], by_priority);
/// assert_eq!(comparator.compare(&0, &1), Ordering::Greater);
/// assert_eq!(comparator.context(), &vec![9, 1, 5]);
/// ```
pub struct WithContext<Ctx, K: ?Sized> {
    context: Ctx,
    function: fn(&Ctx, &K, &K) -> Ordering,
}

impl<Ctx, K: ?Sized> WithContext<Ctx, K> {
    /// Binds `function` to `context`.
    #[must_use]
    pub const fn new(context: Ctx, function: fn(&Ctx, &K, &K) -> Ordering) -> Self {
        Self { context, function }
    }

    /// Returns the bound context.
    #[must_use]
    pub const fn context(&self) -> &Ctx {
        &self.context
    }
}

impl<Ctx, K: ?Sized> Comparator<K> for WithContext<Ctx, K> {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.function)(&self.context, left, right)
    }
}

impl<Ctx: Clone, K: ?Sized> Clone for WithContext<Ctx, K> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            function: self.function,
        }
    }
}

impl<Ctx: fmt::Debug, K: ?Sized> fmt::Debug for WithContext<Ctx, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WithContext")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
