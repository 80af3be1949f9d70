//! collkit: concurrent collections.
//!
//! - [`range::AvlTreeRangeMap`]: AVL tree mapping non-overlapping ranges to values.
//! - [`policy::slru::SlruCache`]: segmented LRU cache with trial and protected segments.
//! - [`ds::TreiberStack`] / [`ds::LinkedQueue`]: lock-free stack and lock-based queue.
//!
//! Every container takes `&self` for mutation and can be shared between
//! threads behind an `Arc`.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod range;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
