//! Error type for object pool operations.

/// Represents errors that can occur while configuring or using an
/// [`ObjectPool`](super::ObjectPool).
///
/// # Examples
///
/// ```rust
/// use avltree::pool::{ObjectPool, PoolError};
///
/// let mut pool: ObjectPool<u32, String> = ObjectPool::new(1).unwrap();
/// pool.claim(7).unwrap();
/// assert_eq!(pool.claim(8).unwrap_err(), PoolError::Exhausted { capacity: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The requested capacity was zero.
    InvalidCapacity,
    /// Every slot is already claimed.
    Exhausted {
        /// The fixed number of slots in the pool.
        capacity: usize,
    },
    /// The key is already bound to a slot.
    KeyInUse,
    /// The key is not bound to any slot.
    UnknownKey,
    /// An integrity sweep found inconsistent bookkeeping.
    Corrupted {
        /// The first slot found to be inconsistent.
        slot: usize,
        /// What is wrong with the slot.
        reason: &'static str,
    },
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity => write!(formatter, "pool capacity must be at least one"),
            Self::Exhausted { capacity } => {
                write!(formatter, "all {capacity} pool slots are claimed")
            }
            Self::KeyInUse => write!(formatter, "key is already bound to a slot"),
            Self::UnknownKey => write!(formatter, "key is not bound to any slot"),
            Self::Corrupted { slot, reason } => {
                write!(formatter, "pool slot #{slot} is corrupted: {reason}")
            }
        }
    }
}

impl std::error::Error for PoolError {}
