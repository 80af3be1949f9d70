#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlruMetricsSnapshot {
    pub find_hits_protected: u64,
    pub find_hits_trial: u64,
    pub find_misses: u64,

    pub puts: u64,
    pub put_updates: u64,
    pub loads: u64,

    pub trial_evictions: u64,
    pub promotions: u64,
    pub demotions: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub trial_len: usize,
    pub protected_len: usize,
    pub trial_capacity: usize,
    pub protected_capacity: usize,
}

impl SlruMetricsSnapshot {
    /// Fraction of `find` calls that hit either segment.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.find_hits_protected + self.find_hits_trial;
        let total = hits + self.find_misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StackMetricsSnapshot {
    pub pushes: u64,
    pub pops: u64,
    pub empty_pops: u64,
    pub cas_retries: u64,
    pub cleans: u64,
}
