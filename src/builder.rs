//! Validated construction of [`SlruCache`] instances.
//!
//! Segment sizes can be given explicitly or derived from a total capacity and
//! the fraction reserved for the trial segment. Validation happens once, in
//! [`SlruCacheBuilder::try_build`].
//!
//! ## Example
//!
//! ```rust
//! use collkit::builder::SlruCacheBuilder;
//!
//! let cache = SlruCacheBuilder::new()
//!     .trial_capacity(40)
//!     .protected_capacity(10)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.find(&1).as_deref().map(String::as_str), Some("hello"));
//!
//! // 100 entries, a quarter of them probationary.
//! let cache = SlruCacheBuilder::with_total(100, 0.25)
//!     .try_build::<u64, u64>()
//!     .unwrap();
//! assert_eq!(cache.trial_capacity(), 25);
//! assert_eq!(cache.protected_capacity(), 75);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::slru::SlruCache;

/// Default trial segment size.
pub const DEFAULT_TRIAL_CAPACITY: usize = 64;
/// Default protected segment size.
pub const DEFAULT_PROTECTED_CAPACITY: usize = 16;

/// Builder for [`SlruCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlruCacheBuilder {
    trial_capacity: usize,
    protected_capacity: usize,
}

impl SlruCacheBuilder {
    /// Starts from the default segment sizes.
    pub fn new() -> Self {
        Self {
            trial_capacity: DEFAULT_TRIAL_CAPACITY,
            protected_capacity: DEFAULT_PROTECTED_CAPACITY,
        }
    }

    /// Splits `total` entries between the segments, `trial_frac` of them
    /// going to trial (rounded down; clamped to `0.0..=1.0`).
    ///
    /// A split that leaves either segment empty is reported by
    /// [`try_build`](Self::try_build).
    pub fn with_total(total: usize, trial_frac: f64) -> Self {
        let frac = if trial_frac.is_nan() {
            0.0
        } else {
            trial_frac.clamp(0.0, 1.0)
        };
        let trial = ((total as f64) * frac) as usize;
        Self {
            trial_capacity: trial,
            protected_capacity: total - trial.min(total),
        }
    }

    pub fn trial_capacity(mut self, capacity: usize) -> Self {
        self.trial_capacity = capacity;
        self
    }

    pub fn protected_capacity(mut self, capacity: usize) -> Self {
        self.protected_capacity = capacity;
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either segment size is zero.
    pub fn try_build<K, V>(self) -> Result<SlruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        SlruCache::new(self.trial_capacity, self.protected_capacity)
    }
}

impl Default for SlruCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let cache = SlruCacheBuilder::new().try_build::<u64, u64>().unwrap();
        assert_eq!(cache.trial_capacity(), DEFAULT_TRIAL_CAPACITY);
        assert_eq!(cache.protected_capacity(), DEFAULT_PROTECTED_CAPACITY);
    }

    #[test]
    fn explicit_sizes_are_used() {
        let cache = SlruCacheBuilder::default()
            .trial_capacity(5)
            .protected_capacity(2)
            .try_build::<u64, u64>()
            .unwrap();
        assert_eq!(cache.capacity(), 7);
    }

    #[test]
    fn zero_sizes_fail_to_build() {
        let err = SlruCacheBuilder::new()
            .trial_capacity(0)
            .try_build::<u64, u64>()
            .unwrap_err();
        assert!(err.message().contains("trial"));

        let err = SlruCacheBuilder::new()
            .protected_capacity(0)
            .try_build::<u64, u64>()
            .unwrap_err();
        assert!(err.message().contains("protected"));
    }

    #[test]
    fn total_split_rounds_trial_down() {
        let builder = SlruCacheBuilder::with_total(10, 0.25);
        assert_eq!(builder, SlruCacheBuilder::new().trial_capacity(2).protected_capacity(8));
    }

    #[test]
    fn degenerate_fractions_are_rejected_at_build() {
        assert!(SlruCacheBuilder::with_total(10, 0.0)
            .try_build::<u8, u8>()
            .is_err());
        assert!(SlruCacheBuilder::with_total(10, 1.0)
            .try_build::<u8, u8>()
            .is_err());
        assert!(SlruCacheBuilder::with_total(10, f64::NAN)
            .try_build::<u8, u8>()
            .is_err());
        assert!(SlruCacheBuilder::with_total(10, 7.5)
            .try_build::<u8, u8>()
            .is_err());
    }
}
