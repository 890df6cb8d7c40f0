//! Fixed-capacity object pool keyed through an [`AvlTree`].
//!
//! An [`ObjectPool`] owns `capacity` preallocated items. Claiming a key
//! takes a slot from a LIFO free list and records `key -> slot` in an
//! AVL map; releasing the key extracts the mapping and returns the slot to
//! the free list. Slots are never allocated or freed after construction.
//!
//! # Examples
//!
//! ```rust
//! use avltree::pool::ObjectPool;
//!
//! let mut pool: ObjectPool<&str, Vec<u8>> = ObjectPool::new(2)?;
//! pool.claim("frame-a")?.extend_from_slice(b"abc");
//! assert_eq!(pool.find(&"frame-a").map(Vec::len), Some(3));
//!
//! let slot = pool.release(&"frame-a")?;
//! assert_eq!(slot, 0);
//! assert!(pool.is_empty());
//! # Ok::<(), avltree::pool::PoolError>(())
//! ```

mod config;
mod error;

use std::fmt;

use crate::comparator::{Comparator, NaturalOrder};
use crate::tree::{AvlTree, InsertOutcome};

pub use config::PoolConfig;
pub use error::PoolError;

/// A fixed set of reusable items addressed by caller-chosen keys.
///
/// # Time Complexity
///
/// | Operation           | Complexity |
/// |---------------------|------------|
/// | `claim` / `release` | O(log N)   |
/// | `find` / `find_mut` | O(log N)   |
/// | `verify_integrity`  | O(N)       |
/// | `len` / `capacity`  | O(1)       |
pub struct ObjectPool<K, T, C = NaturalOrder> {
    items: Vec<T>,
    /// Unclaimed slot indices; the last element is handed out next.
    free: Vec<usize>,
    used: AvlTree<K, usize, C>,
    config: PoolConfig,
}

impl<K: Ord, T: Default> ObjectPool<K, T, NaturalOrder> {
    /// Creates a pool of `capacity` default-initialised items.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(capacity))
    }

    /// Creates a pool from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidCapacity`] if the configured capacity is zero.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        Self::with_comparator(config, NaturalOrder)
    }
}

impl<K, T: Default, C: Comparator<K>> ObjectPool<K, T, C> {
    /// Creates a pool whose keys are ordered by `comparator`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidCapacity`] if the configured capacity is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::comparator::Reversed;
    /// use avltree::comparator::NaturalOrder;
    /// use avltree::pool::{ObjectPool, PoolConfig};
    ///
    /// let mut pool: ObjectPool<u8, u8, _> =
    ///     ObjectPool::with_comparator(PoolConfig::new(4), Reversed(NaturalOrder))?;
    /// for key in [1, 3, 2] {
    ///     *pool.claim(key)? = key * 10;
    /// }
    /// let mut keys = Vec::new();
    /// pool.walk_items(|key, _| {
    ///     keys.push(*key);
    ///     true
    /// });
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// # Ok::<(), avltree::pool::PoolError>(())
    /// ```
    pub fn with_comparator(config: PoolConfig, comparator: C) -> Result<Self, PoolError> {
        let config = config.validate()?;
        let capacity = config.capacity();
        Ok(Self {
            items: std::iter::repeat_with(T::default).take(capacity).collect(),
            free: (0..capacity).rev().collect(),
            used: AvlTree::with_comparator(comparator),
            config,
        })
    }

    /// Binds `key` to a free slot and returns the slot's item.
    ///
    /// The item is reset to `T::default()` first unless the pool was
    /// configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::KeyInUse`] if `key` is already bound, or
    /// [`PoolError::Exhausted`] if no slot is free, or
    /// [`PoolError::Corrupted`] if the free list hands out a slot that does
    /// not exist. The pool is unchanged in every case.
    pub fn claim(&mut self, key: K) -> Result<&mut T, PoolError> {
        if self.used.contains_key(&key) {
            tracing::warn!(live = self.used.len(), "refusing claim of a key already in use");
            return Err(PoolError::KeyInUse);
        }
        let Some(slot) = self.free.pop() else {
            tracing::warn!(capacity = self.capacity(), "refusing claim, pool exhausted");
            return Err(PoolError::Exhausted {
                capacity: self.capacity(),
            });
        };
        let Some(item) = self.items.get_mut(slot) else {
            self.free.push(slot);
            tracing::warn!(slot, "refusing claim, free slot out of range");
            return Err(PoolError::Corrupted {
                slot,
                reason: "free slot out of range",
            });
        };
        if let InsertOutcome::Ignored(slot) | InsertOutcome::Replaced(slot) =
            self.used.insert(key, slot)
        {
            self.free.push(slot);
            return Err(PoolError::KeyInUse);
        }
        tracing::debug!(slot, live = self.used.len(), "claimed pool slot");

        if self.config.reset_on_claim() {
            *item = T::default();
        }
        Ok(item)
    }
}

impl<K, T, C: Comparator<K>> ObjectPool<K, T, C> {
    /// Returns the item bound to `key`.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&T> {
        self.used.find(key).and_then(|&slot| self.items.get(slot))
    }

    /// Returns the item bound to `key` for modification.
    #[must_use]
    pub fn find_mut(&mut self, key: &K) -> Option<&mut T> {
        let slot = *self.used.find(key)?;
        self.items.get_mut(slot)
    }

    /// Returns the slot index bound to `key`.
    #[must_use]
    pub fn slot_index(&self, key: &K) -> Option<usize> {
        self.used.find(key).copied()
    }

    /// Unbinds `key` and returns its slot to the free list.
    ///
    /// The slot's item is left as is until the slot is claimed again.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownKey`] if `key` is not bound.
    pub fn release(&mut self, key: &K) -> Result<usize, PoolError> {
        let slot = self.used.extract(key).ok_or(PoolError::UnknownKey)?;
        self.free.push(slot);
        tracing::debug!(slot, live = self.used.len(), "released pool slot");
        Ok(slot)
    }
}

impl<K, T, C> ObjectPool<K, T, C> {
    /// Releases every claimed slot at once.
    pub fn clear(&mut self) {
        self.used.clear();
        self.free.clear();
        self.free.extend((0..self.items.len()).rev());
        tracing::debug!(capacity = self.capacity(), "released all pool slots");
    }

    /// Returns the fixed number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of claimed slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.used.len()
    }

    /// Returns the number of unclaimed slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Returns `true` if no slot is claimed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Returns `true` if every slot is claimed.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Returns the pool's configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Visits every claimed item in key order until `visitor` returns `false`.
    ///
    /// Returns `false` if the walk stopped early.
    pub fn walk_items<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(&K, &T) -> bool,
    {
        self.used.walk(|key, &slot| {
            self.items
                .get(slot)
                .is_none_or(|item| visitor(key, item))
        })
    }

    /// Cross-checks the key map against the free list.
    ///
    /// Every claimed slot must be in range and bound to exactly one key,
    /// no claimed slot may sit on the free list, and every slot must be
    /// either claimed or free.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Corrupted`] naming the first inconsistent slot.
    pub fn verify_integrity(&self) -> Result<(), PoolError> {
        let result = self.sweep();
        if let Err(PoolError::Corrupted { slot, reason }) = &result {
            tracing::warn!(slot, reason, "pool integrity check failed");
        }
        result
    }

    fn sweep(&self) -> Result<(), PoolError> {
        let capacity = self.capacity();
        let mut claimed = vec![false; capacity];
        let mut failure = None;
        self.used.walk(|_, &slot| {
            match claimed.get_mut(slot) {
                None => failure = Some((slot, "claimed slot out of range")),
                Some(true) => failure = Some((slot, "slot bound to two keys")),
                Some(seen) => *seen = true,
            }
            failure.is_none()
        });
        if let Some((slot, reason)) = failure {
            return Err(PoolError::Corrupted { slot, reason });
        }

        let mut free = vec![false; capacity];
        for &slot in &self.free {
            let reason = if slot >= capacity {
                "free slot out of range"
            } else if claimed[slot] {
                "claimed slot on free list"
            } else if free[slot] {
                "slot freed twice"
            } else {
                free[slot] = true;
                continue;
            };
            return Err(PoolError::Corrupted { slot, reason });
        }

        match (0..capacity).find(|&slot| !claimed[slot] && !free[slot]) {
            Some(slot) => Err(PoolError::Corrupted {
                slot,
                reason: "slot neither claimed nor free",
            }),
            None => Ok(()),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug, C> fmt::Debug for ObjectPool<K, T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = formatter.debug_map();
        self.walk_items(|key, item| {
            map.entry(key, item);
            true
        });
        map.finish()
    }
}

static_assertions::assert_impl_all!(ObjectPool<u64, String>: Send, Sync);
