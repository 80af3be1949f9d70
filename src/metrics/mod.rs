//! Optional counters for the cache and the lock-free stack.
//!
//! Enabled with the `metrics` Cargo feature. Recorders only write counters,
//! snapshot providers only read them. All counters are relaxed atomics: they
//! are observational and never influence the behaviour of a container.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::{SlruMetrics, StackMetrics};
pub use snapshot::{SlruMetricsSnapshot, StackMetricsSnapshot};
pub use traits::{MetricsReset, MetricsSnapshotProvider, SlruMetricsRecorder, StackMetricsRecorder};
