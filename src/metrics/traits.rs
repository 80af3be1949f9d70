//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and resetting are split into small traits so the
//! containers only ever see the recorder side.
//!
//! ```text
//!   ┌─────────────────────────┐      ┌─────────────────────────┐
//!   │   SlruMetricsRecorder   │      │  StackMetricsRecorder   │
//!   │ hit/miss/promote/demote │      │ push/pop/cas_retry      │
//!   │ evict/put/load          │      │ clean                   │
//!   └────────────┬────────────┘      └────────────┬────────────┘
//!                │                                │
//!                ▼                                ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ MetricsSnapshotProvider<S> + MetricsReset (bench/test)   │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&self`: the containers are shared between threads
//! and record through interior mutability.

/// Counters for the segmented LRU cache.
pub trait SlruMetricsRecorder {
    fn record_find_hit_protected(&self);
    fn record_find_hit_trial(&self);
    fn record_find_miss(&self);
    fn record_put(&self);
    fn record_put_update(&self);
    fn record_trial_eviction(&self);
    fn record_promotion(&self);
    fn record_demotion(&self);
    fn record_load(&self);
    fn record_clear(&self);
}

/// Counters for the lock-free stack.
pub trait StackMetricsRecorder {
    fn record_push(&self);
    fn record_pop(&self);
    fn record_pop_empty(&self);
    fn record_cas_retry(&self);
    fn record_clean(&self);
}

/// Produce a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}
