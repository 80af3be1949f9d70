//! Error types for the collkit library.
//!
//! ## Key Components
//!
//! - [`RangeError`]: Returned when range bounds are invalid (`max <= min` or a
//!   missing bound).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero segment capacity, zero queue bound).
//! - [`InvalidArgumentError`]: Returned when an operation receives an
//!   argument it cannot work with (e.g. no loader for a loading lookup).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use collkit::error::{ConfigError, RangeError};
//! use collkit::policy::slru::SlruCache;
//! use collkit::range::Range;
//!
//! let cache: Result<SlruCache<u64, String>, ConfigError> = SlruCache::new(5, 2);
//! assert!(cache.is_ok());
//!
//! let bad: Result<Range<i32>, RangeError> = Range::new(10, 10);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// RangeError
// ---------------------------------------------------------------------------

/// Error returned when a [`Range`](crate::range::Range) cannot be built from
/// the given bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError(String);

impl RangeError {
    /// Creates a new `RangeError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RangeError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by [`SlruCache::new`](crate::policy::slru::SlruCache::new),
/// [`SlruCacheBuilder::try_build`](crate::builder::SlruCacheBuilder::try_build)
/// and [`LinkedQueue::bounded`](crate::ds::LinkedQueue::bounded).
///
/// # Example
///
/// ```
/// use collkit::policy::slru::SlruCache;
///
/// let err = SlruCache::<u64, u64>::new(0, 2).unwrap_err();
/// assert!(err.to_string().contains("trial"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvalidArgumentError
// ---------------------------------------------------------------------------

/// Error returned when an operation is called with an unusable argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError(String);

impl InvalidArgumentError {
    /// Creates a new `InvalidArgumentError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidArgumentError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`AvlTreeRangeMap::check_invariants`](crate::range::avl::AvlTreeRangeMap::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error<T: std::error::Error>() {}

    // -- RangeError -------------------------------------------------------

    #[test]
    fn range_display_shows_message() {
        let err = RangeError::new("range maximum must be greater than minimum");
        assert_eq!(
            err.to_string(),
            "range maximum must be greater than minimum"
        );
    }

    #[test]
    fn range_message_accessor_and_eq() {
        let a = RangeError::new("x");
        assert_eq!(a.message(), "x");
        assert_eq!(a.clone(), a);
        assert_error::<RangeError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("trial capacity must be > 0");
        assert_eq!(err.to_string(), "trial capacity must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad bound");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad bound"));
        assert_error::<ConfigError>();
    }

    // -- InvalidArgumentError ---------------------------------------------

    #[test]
    fn invalid_argument_display_and_accessor() {
        let err = InvalidArgumentError::new("loader can not be absent");
        assert_eq!(err.to_string(), "loader can not be absent");
        assert_eq!(err.message(), "loader can not be absent");
        assert_error::<InvalidArgumentError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("balance factor out of range");
        assert_eq!(err.to_string(), "balance factor out of range");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_error::<InvariantError>();
    }
}
