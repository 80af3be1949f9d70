//! Closed ranges of ordered keys and the range map built on them.
//!
//! ## Ordering
//!
//! A [`Range`] compares against a scalar key and against another range:
//!
//! ```text
//!   cmp_key(k)                    cmp_range(rhs)
//!   ──────────                    ──────────────
//!   k < min        → Less         self entirely before rhs  → Less
//!   min ≤ k ≤ max  → Equal        self entirely after rhs   → Greater
//!   k > max        → Greater      anything else             → Equal
//!
//!   [-100, 0] vs [0, 100]   → Less    (one shared endpoint is allowed)
//!   [-100, 100] vs [-50, 50] → Equal  (containment collides)
//!   [0, 50] vs [10, 100]    → Equal   (overlap collides)
//!   [0, 100] vs [0, 100]    → Equal   (duplicate collides)
//! ```
//!
//! `cmp_range` is deliberately not a total order, so `Range` does not
//! implement `Ord`; the tree treats `Equal` as "collision, reject".
//!
//! Partially overlapping and duplicate ranges are never ordered against each
//! other. A range map therefore never holds two ranges that share more than
//! an endpoint, and inserting an overlapping range returns `None` instead of
//! placing it beside the existing one.

pub mod avl;

use std::cmp::Ordering;
use std::fmt;

use crate::error::RangeError;

pub use avl::AvlTreeRangeMap;

/// Immutable closed interval `[min, max]` with `min < max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range<K> {
    min: K,
    max: K,
}

impl<K: Ord> Range<K> {
    /// Creates a range including both bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when `max <= min`.
    ///
    /// # Example
    ///
    /// ```
    /// use collkit::range::Range;
    ///
    /// let r = Range::new(0, 100).unwrap();
    /// assert!(r.contains(&0));
    /// assert!(r.contains(&100));
    /// assert!(Range::new(5, 5).is_err());
    /// ```
    pub fn new(min: K, max: K) -> Result<Self, RangeError> {
        if max <= min {
            return Err(RangeError::new(
                "range maximum must be greater than range minimum",
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates a range from possibly missing bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when either bound is `None` or `max <= min`.
    pub fn try_from_bounds(min: Option<K>, max: Option<K>) -> Result<Self, RangeError> {
        let min = min.ok_or_else(|| RangeError::new("range minimum must be specified"))?;
        let max = max.ok_or_else(|| RangeError::new("range maximum must be specified"))?;
        Self::new(min, max)
    }

    pub fn min(&self) -> &K {
        &self.min
    }

    pub fn max(&self) -> &K {
        &self.max
    }

    /// Locates `key` relative to this range, both ends inclusive.
    pub fn cmp_key(&self, key: &K) -> Ordering {
        if *key < self.min {
            Ordering::Less
        } else if *key > self.max {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns `true` if `min <= key <= max`.
    pub fn contains(&self, key: &K) -> bool {
        self.cmp_key(key) == Ordering::Equal
    }

    /// Returns `true` if `rhs` is nested in this range (bounds may coincide).
    pub fn contains_range(&self, rhs: &Range<K>) -> bool {
        rhs.max <= self.max && rhs.min >= self.min
    }

    /// Placement order used by the range map.
    ///
    /// `Less`/`Greater` only when the ranges are disjoint apart from at most a
    /// shared endpoint; every other pair compares `Equal`.
    pub fn cmp_range(&self, rhs: &Range<K>) -> Ordering {
        if self.max <= rhs.min {
            Ordering::Less
        } else if self.min >= rhs.max {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<K: fmt::Display> fmt::Display for Range<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Result of a range map lookup: either nothing, or the matched range and a
/// copy of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMatch<K, V> {
    hit: Option<(Range<K>, V)>,
}

impl<K, V> RangeMatch<K, V> {
    pub(crate) fn found(range: Range<K>, value: V) -> Self {
        Self {
            hit: Some((range, value)),
        }
    }

    pub(crate) fn absent() -> Self {
        Self { hit: None }
    }

    /// Returns `true` if the lookup found a range.
    pub fn is_present(&self) -> bool {
        self.hit.is_some()
    }

    pub fn value(&self) -> Option<&V> {
        self.hit.as_ref().map(|(_, value)| value)
    }

    pub fn range(&self) -> Option<&Range<K>> {
        self.hit.as_ref().map(|(range, _)| range)
    }

    pub fn into_inner(self) -> Option<(Range<K>, V)> {
        self.hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(min: i32, max: i32) -> Range<i32> {
        Range::new(min, max).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn rejects_empty_and_inverted_bounds() {
            assert!(Range::new(0, 0).is_err());
            assert!(Range::new(1, 0).is_err());
            assert!(Range::new(0, 1).is_ok());
        }

        #[test]
        fn rejects_missing_bounds() {
            let err = Range::<i32>::try_from_bounds(None, Some(1)).unwrap_err();
            assert!(err.message().contains("minimum"));
            let err = Range::<i32>::try_from_bounds(Some(0), None).unwrap_err();
            assert!(err.message().contains("maximum"));
            assert_eq!(Range::try_from_bounds(Some(0), Some(1)), Ok(r(0, 1)));
        }

        #[test]
        fn equality_is_structural() {
            assert_eq!(r(0, 100), r(0, 100));
            assert_ne!(r(-100, 100), r(-50, 50));
        }

        #[test]
        fn display_shows_bounds() {
            assert_eq!(r(-1, 5).to_string(), "[-1, 5]");
        }
    }

    mod comparison {
        use super::*;

        #[test]
        fn cmp_range_orders_disjoint_ranges() {
            assert_eq!(r(0, 1).cmp_range(&r(-1, 0)), Ordering::Greater);
            assert_eq!(r(-1, 0).cmp_range(&r(1, 100)), Ordering::Less);
        }

        #[test]
        fn cmp_range_collides_on_overlap() {
            assert_eq!(r(-100, 100).cmp_range(&r(-50, 50)), Ordering::Equal);
            assert_eq!(r(-50, 50).cmp_range(&r(-100, 100)), Ordering::Equal);
            assert_eq!(r(0, 50).cmp_range(&r(10, 100)), Ordering::Equal);
            assert_eq!(r(0, 100).cmp_range(&r(0, 100)), Ordering::Equal);
        }

        #[test]
        fn shared_endpoint_is_not_a_collision() {
            let lower = r(-100, 0);
            let upper = r(0, 100);
            assert!(!lower.contains_range(&upper));
            assert_eq!(lower.cmp_range(&upper), Ordering::Less);
            assert_eq!(upper.cmp_range(&lower), Ordering::Greater);
        }

        #[test]
        fn cmp_key_is_inclusive() {
            let range = r(0, 100);
            assert_eq!(range.cmp_key(&50), Ordering::Equal);
            assert_eq!(range.cmp_key(&0), Ordering::Equal);
            assert_eq!(range.cmp_key(&100), Ordering::Equal);
            assert_eq!(range.cmp_key(&200), Ordering::Greater);
            assert_eq!(range.cmp_key(&-1), Ordering::Less);
        }

        #[test]
        fn contains_range_allows_coinciding_bounds() {
            assert!(r(-100, 100).contains_range(&r(-50, 50)));
            assert!(r(-100, 100).contains_range(&r(-100, 100)));
            assert!(!r(-50, 50).contains_range(&r(-100, 100)));
        }
    }

    mod range_match {
        use super::*;

        #[test]
        fn absent_has_nothing() {
            let m: RangeMatch<i32, &str> = RangeMatch::absent();
            assert!(!m.is_present());
            assert_eq!(m.value(), None);
            assert_eq!(m.range(), None);
            assert_eq!(m.into_inner(), None);
        }

        #[test]
        fn found_exposes_range_and_value() {
            let m = RangeMatch::found(r(0, 10), "x");
            assert!(m.is_present());
            assert_eq!(m.value(), Some(&"x"));
            assert_eq!(m.range(), Some(&r(0, 10)));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: construction fails iff max <= min
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_new_fails_iff_not_increasing(min in any::<i32>(), max in any::<i32>()) {
                prop_assert_eq!(Range::new(min, max).is_err(), max <= min);
            }

            /// Property: contains(k) iff min <= k <= max
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_contains_matches_bounds(
                min in -1000i32..1000,
                len in 1i32..1000,
                key in -3000i32..3000
            ) {
                let range = Range::new(min, min + len).unwrap();
                prop_assert_eq!(range.contains(&key), min <= key && key <= min + len);
            }

            /// Property: cmp_range is antisymmetric
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_cmp_range_antisymmetric(
                a in -100i32..100, al in 1i32..50,
                b in -100i32..100, bl in 1i32..50
            ) {
                let x = Range::new(a, a + al).unwrap();
                let y = Range::new(b, b + bl).unwrap();
                prop_assert_eq!(x.cmp_range(&y), y.cmp_range(&x).reverse());
            }
        }
    }
}
