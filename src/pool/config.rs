//! Pool configuration.

use super::PoolError;

/// Construction parameters for an [`ObjectPool`](super::ObjectPool).
///
/// # Examples
///
/// ```rust
/// use avltree::pool::PoolConfig;
///
/// let config = PoolConfig::new(16).with_reset_on_claim(false);
/// assert_eq!(config.capacity(), 16);
/// assert!(!config.reset_on_claim());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    capacity: usize,
    reset_on_claim: bool,
}

impl PoolConfig {
    /// Creates a configuration for `capacity` slots.
    ///
    /// Claimed slots are reset to `T::default()` unless turned off with
    /// [`with_reset_on_claim`](Self::with_reset_on_claim).
    #[inline]
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            reset_on_claim: true,
        }
    }

    /// Sets whether a slot is re-initialised each time it is claimed.
    ///
    /// When disabled, a claimed slot still holds whatever its previous
    /// owner left behind.
    #[inline]
    #[must_use]
    pub const fn with_reset_on_claim(mut self, reset_on_claim: bool) -> Self {
        self.reset_on_claim = reset_on_claim;
        self
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether claimed slots are reset.
    #[inline]
    #[must_use]
    pub const fn reset_on_claim(&self) -> bool {
        self.reset_on_claim
    }

    pub(super) const fn validate(self) -> Result<Self, PoolError> {
        if self.capacity == 0 {
            Err(PoolError::InvalidCapacity)
        } else {
            Ok(self)
        }
    }
}
