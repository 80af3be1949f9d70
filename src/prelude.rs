pub use crate::builder::SlruCacheBuilder;
pub use crate::ds::{LinkedQueue, TreiberStack};
pub use crate::error::{ConfigError, InvalidArgumentError, InvariantError, RangeError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{MetricsSnapshotProvider, SlruMetricsSnapshot, StackMetricsSnapshot};
pub use crate::policy::slru::SlruCache;
pub use crate::range::{AvlTreeRangeMap, Range, RangeMatch};
pub use crate::traits::{Cache, CacheLoader, Container, Queue, RangeMap, Stack};
