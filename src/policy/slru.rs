//! Segmented LRU (SLRU) cache shared between threads.
//!
//! New entries land in a probationary *trial* segment. A second access
//! promotes an entry into the *protected* segment, so one-off accesses never
//! push hot entries out. When protected is full, its coldest entry is demoted
//! back into trial instead of being dropped. A demoted entry keeps its last
//! access time, so it is usually the next trial eviction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                           SlruCache<K, V>                                │
//! │                                                                          │
//! │   clock: AtomicU64 ── unique access tick for every touch                 │
//! │                                                                          │
//! │   trial: Segment                        protected: Segment               │
//! │   ┌──────────────────────────────┐      ┌──────────────────────────────┐ │
//! │   │ Mutex<SegmentState>          │      │ Mutex<SegmentState>          │ │
//! │   │  entries: FxHashMap<K, Entry>│      │  entries: FxHashMap<K, Entry>│ │
//! │   │  order:   BTreeMap<tick, K>  │      │  order:   BTreeMap<tick, K>  │ │
//! │   │           oldest ─► newest   │      │           oldest ─► newest   │ │
//! │   └──────────────┬───────────────┘      └──────────────┬───────────────┘ │
//! │                  │  find() hit: promote ──────────────►│                 │
//! │                  │◄────────────── demote coldest when full               │
//! │                  ▼                                                       │
//! │      evict oldest when trial is full                                     │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation      | Locks taken                    | Notes                        |
//! |----------------|--------------------------------|------------------------------|
//! | `put`          | protected, then trial          | In-place update if protected |
//! | `find`         | protected, then trial (+ both) | Trial hit promotes           |
//! | `find_or_load` | as `find` + `put`              | Loader runs outside locks    |
//! | `contains`     | protected, then trial          | No reordering                |
//! | `clear`        | each segment in turn           |                              |
//!
//! All operations are O(log n) in the segment size (the recency index is a
//! `BTreeMap`).
//!
//! ## Thread Safety
//!
//! Each segment has its own `parking_lot::Mutex`, and no operation holds both
//! locks at once. Promotion is therefore two separately locked steps: remove
//! from trial, then insert into protected (demoting into trial afterwards).
//! Between those steps a concurrent reader can miss the key in both segments,
//! and a concurrent `put` of the same key can land it in trial while it is
//! also being promoted. Each segment stays internally consistent and within
//! its capacity; only the cross-segment view is relaxed.
//!
//! ## Example Usage
//!
//! ```
//! use collkit::policy::slru::SlruCache;
//!
//! let cache = SlruCache::new(2, 2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//!
//! // Second access promotes "a" into the protected segment.
//! assert_eq!(cache.find(&"a").as_deref(), Some(&1));
//! assert_eq!(cache.protected_len(), 1);
//!
//! // A scan of new keys only churns the trial segment.
//! cache.put("c", 3);
//! cache.put("d", 4);
//! cache.put("e", 5);
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

use std::collections::BTreeMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvalidArgumentError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsReset, MetricsSnapshotProvider, SlruMetrics, SlruMetricsRecorder, SlruMetricsSnapshot,
};
use crate::traits::{Cache, CacheLoader};

#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    access_time: u64,
}

#[derive(Debug)]
struct SegmentState<K, V> {
    entries: FxHashMap<K, CacheEntry<V>>,
    order: BTreeMap<u64, K>,
}

impl<K, V> SegmentState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            order: BTreeMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Stores `value` at recency `tick`, replacing any entry for `key`.
    fn insert(&mut self, key: K, value: Arc<V>, tick: u64) {
        let entry = CacheEntry {
            value,
            access_time: tick,
        };
        if let Some(old) = self.entries.insert(key.clone(), entry) {
            self.order.remove(&old.access_time);
        }
        self.order.insert(tick, key);
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.access_time);
        Some(entry)
    }

    fn pop_oldest(&mut self) -> Option<(K, CacheEntry<V>)> {
        let (_, key) = self.order.pop_first()?;
        let entry = self.entries.remove(&key)?;
        Some((key, entry))
    }

    /// Marks `key` as the newest entry and returns its value.
    fn touch(&mut self, key: &K, tick: u64) -> Option<Arc<V>> {
        let entry = self.entries.get_mut(key)?;
        self.order.remove(&entry.access_time);
        entry.access_time = tick;
        self.order.insert(tick, key.clone());
        Some(Arc::clone(&entry.value))
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn check(&self, name: &str, max_size: usize) -> Result<(), InvariantError> {
        if self.entries.len() > max_size {
            return Err(InvariantError::new(format!(
                "{} segment holds {} entries, capacity {}",
                name,
                self.entries.len(),
                max_size
            )));
        }
        if self.entries.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "{} segment map/index size mismatch: {} vs {}",
                name,
                self.entries.len(),
                self.order.len()
            )));
        }
        for (tick, key) in &self.order {
            match self.entries.get(key) {
                Some(entry) if entry.access_time == *tick => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "{} segment index entry at tick {} is stale",
                        name, tick
                    )));
                },
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Segment<K, V> {
    max_size: usize,
    state: Mutex<SegmentState<K, V>>,
}

impl<K, V> Segment<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(max_size: usize) -> Self {
        Self {
            max_size,
            state: Mutex::new(SegmentState::new()),
        }
    }

    fn len(&self) -> usize {
        self.state.lock().len()
    }
}

/// Thread-safe segmented LRU cache.
///
/// Values are stored behind `Arc`, so lookups hand out cheap shared handles
/// and never hold a segment lock while the caller uses the value.
#[derive(Debug)]
pub struct SlruCache<K, V> {
    trial: Segment<K, V>,
    protected: Segment<K, V>,
    clock: AtomicU64,
    #[cfg(feature = "metrics")]
    metrics: SlruMetrics,
}

impl<K, V> SlruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the given segment capacities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either capacity is zero.
    pub fn new(trial_capacity: usize, protected_capacity: usize) -> Result<Self, ConfigError> {
        if trial_capacity == 0 {
            return Err(ConfigError::new("trial capacity must be > 0"));
        }
        if protected_capacity == 0 {
            return Err(ConfigError::new("protected capacity must be > 0"));
        }
        Ok(Self {
            trial: Segment::new(trial_capacity),
            protected: Segment::new(protected_capacity),
            clock: AtomicU64::new(0),
            #[cfg(feature = "metrics")]
            metrics: SlruMetrics::new(),
        })
    }

    #[inline]
    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Stores `value` under `key`.
    ///
    /// A key already in protected keeps its position and only has its value
    /// replaced. Otherwise the entry becomes the newest in trial, evicting
    /// trial's oldest entry first when trial is full.
    pub fn put(&self, key: K, value: V) {
        let value = Arc::new(value);

        {
            let mut protected = self.protected.state.lock();
            if let Some(entry) = protected.entries.get_mut(&key) {
                entry.value = value;
                #[cfg(feature = "metrics")]
                self.metrics.record_put_update();
                return;
            }
        }

        let tick = self.tick();
        let mut trial = self.trial.state.lock();
        if trial.entries.contains_key(&key) {
            trial.insert(key, value, tick);
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            return;
        }

        if trial.len() >= self.trial.max_size && trial.pop_oldest().is_some() {
            debug!("slru trial segment full, evicted oldest entry");
            #[cfg(feature = "metrics")]
            self.metrics.record_trial_eviction();
        }
        trial.insert(key, value, tick);
        #[cfg(feature = "metrics")]
        self.metrics.record_put();
    }

    /// Looks `key` up.
    ///
    /// A protected hit refreshes the entry. A trial hit promotes the entry
    /// into protected; if protected is full, its oldest entry is demoted to
    /// trial.
    pub fn find(&self, key: &K) -> Option<Arc<V>> {
        let tick = self.tick();
        if let Some(value) = self.protected.state.lock().touch(key, tick) {
            #[cfg(feature = "metrics")]
            self.metrics.record_find_hit_protected();
            return Some(value);
        }

        let entry = self.trial.state.lock().remove(key);
        let Some(entry) = entry else {
            #[cfg(feature = "metrics")]
            self.metrics.record_find_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_find_hit_trial();
        let value = Arc::clone(&entry.value);
        self.promote(key.clone(), entry.value);
        Some(value)
    }

    fn promote(&self, key: K, value: Arc<V>) {
        let demoted = {
            let mut protected = self.protected.state.lock();
            let demoted = if protected.len() >= self.protected.max_size {
                protected.pop_oldest()
            } else {
                None
            };
            protected.insert(key, value, self.tick());
            demoted
        };
        trace!("slru entry promoted to protected segment");
        #[cfg(feature = "metrics")]
        self.metrics.record_promotion();

        if let Some((key, entry)) = demoted {
            let mut trial = self.trial.state.lock();
            if trial.len() >= self.trial.max_size && trial.pop_oldest().is_some() {
                debug!("slru trial segment full on demotion, evicted oldest entry");
                #[cfg(feature = "metrics")]
                self.metrics.record_trial_eviction();
            }
            // demoted entries keep their access time
            trial.insert(key, entry.value, entry.access_time);
            debug!("slru protected segment full, demoted oldest entry to trial");
            #[cfg(feature = "metrics")]
            self.metrics.record_demotion();
        }
    }

    /// Looks `key` up and, on a miss, stores the value produced by `loader`.
    ///
    /// The lookup is fire-and-load: the result is always `Ok(None)`, and a
    /// later [`find`](Self::find) returns the loaded value. The loader runs
    /// without any segment lock held.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `loader` is `None`.
    pub fn find_or_load<L>(
        &self,
        key: &K,
        loader: Option<&L>,
    ) -> Result<Option<Arc<V>>, InvalidArgumentError>
    where
        L: CacheLoader<K, V> + ?Sized,
    {
        let loader = loader.ok_or_else(|| InvalidArgumentError::new("cache loader must be set"))?;
        if self.find(key).is_none() {
            let value = loader.load(key);
            #[cfg(feature = "metrics")]
            self.metrics.record_load();
            self.put(key.clone(), value);
        }
        Ok(None)
    }

    /// Returns `true` if either segment holds `key`. Does not reorder.
    pub fn contains(&self, key: &K) -> bool {
        self.protected.state.lock().entries.contains_key(key)
            || self.trial.state.lock().entries.contains_key(key)
    }

    pub fn trial_len(&self) -> usize {
        self.trial.len()
    }

    pub fn protected_len(&self) -> usize {
        self.protected.len()
    }

    /// Total entries across both segments.
    pub fn len(&self) -> usize {
        self.trial_len() + self.protected_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn trial_capacity(&self) -> usize {
        self.trial.max_size
    }

    pub fn protected_capacity(&self) -> usize {
        self.protected.max_size
    }

    /// Combined capacity of both segments.
    pub fn capacity(&self) -> usize {
        self.trial.max_size + self.protected.max_size
    }

    /// Drops every entry from both segments.
    pub fn clear(&self) {
        self.protected.state.lock().clear();
        self.trial.state.lock().clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Verifies segment capacities, map/index agreement and that no key sits
    /// in both segments. Only meaningful while no other thread mutates the
    /// cache.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let protected = self.protected.state.lock();
        protected.check("protected", self.protected.max_size)?;
        let trial = self.trial.state.lock();
        trial.check("trial", self.trial.max_size)?;

        if trial.entries.keys().any(|key| protected.entries.contains_key(key)) {
            return Err(InvariantError::new("key present in both segments"));
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SlruMetricsSnapshot> for SlruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> SlruMetricsSnapshot {
        SlruMetricsSnapshot {
            find_hits_protected: self.metrics.find_hits_protected.get(),
            find_hits_trial: self.metrics.find_hits_trial.get(),
            find_misses: self.metrics.find_misses.get(),
            puts: self.metrics.puts.get(),
            put_updates: self.metrics.put_updates.get(),
            loads: self.metrics.loads.get(),
            trial_evictions: self.metrics.trial_evictions.get(),
            promotions: self.metrics.promotions.get(),
            demotions: self.metrics.demotions.get(),
            clears: self.metrics.clears.get(),
            trial_len: self.trial_len(),
            protected_len: self.protected_len(),
            trial_capacity: self.trial_capacity(),
            protected_capacity: self.protected_capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for SlruCache<K, V> {
    fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }
}

impl<K, V> Cache<K, V> for SlruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&self, key: K, value: V) {
        SlruCache::put(self, key, value)
    }

    fn find(&self, key: &K) -> Option<Arc<V>> {
        SlruCache::find(self, key)
    }

    fn find_or_load<L>(
        &self,
        key: &K,
        loader: Option<&L>,
    ) -> Result<Option<Arc<V>>, InvalidArgumentError>
    where
        L: CacheLoader<K, V> + ?Sized,
    {
        SlruCache::find_or_load(self, key, loader)
    }
}
