use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::StackMetricsSnapshot;
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, SlruMetricsRecorder, StackMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct SlruMetrics {
    pub find_hits_protected: MetricsCell,
    pub find_hits_trial: MetricsCell,
    pub find_misses: MetricsCell,
    pub puts: MetricsCell,
    pub put_updates: MetricsCell,
    pub loads: MetricsCell,
    pub trial_evictions: MetricsCell,
    pub promotions: MetricsCell,
    pub demotions: MetricsCell,
    pub clears: MetricsCell,
}

impl SlruMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn cells(&self) -> [&MetricsCell; 10] {
        [
            &self.find_hits_protected,
            &self.find_hits_trial,
            &self.find_misses,
            &self.puts,
            &self.put_updates,
            &self.loads,
            &self.trial_evictions,
            &self.promotions,
            &self.demotions,
            &self.clears,
        ]
    }
}

impl SlruMetricsRecorder for SlruMetrics {
    fn record_find_hit_protected(&self) {
        self.find_hits_protected.incr();
    }

    fn record_find_hit_trial(&self) {
        self.find_hits_trial.incr();
    }

    fn record_find_miss(&self) {
        self.find_misses.incr();
    }

    fn record_put(&self) {
        self.puts.incr();
    }

    fn record_put_update(&self) {
        self.put_updates.incr();
    }

    fn record_trial_eviction(&self) {
        self.trial_evictions.incr();
    }

    fn record_promotion(&self) {
        self.promotions.incr();
    }

    fn record_demotion(&self) {
        self.demotions.incr();
    }

    fn record_load(&self) {
        self.loads.incr();
    }

    fn record_clear(&self) {
        self.clears.incr();
    }
}

impl MetricsReset for SlruMetrics {
    fn reset_metrics(&self) {
        for cell in self.cells() {
            cell.reset();
        }
    }
}

#[derive(Debug, Default)]
pub struct StackMetrics {
    pub pushes: MetricsCell,
    pub pops: MetricsCell,
    pub empty_pops: MetricsCell,
    pub cas_retries: MetricsCell,
    pub cleans: MetricsCell,
}

impl StackMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StackMetricsRecorder for StackMetrics {
    fn record_push(&self) {
        self.pushes.incr();
    }

    fn record_pop(&self) {
        self.pops.incr();
    }

    fn record_pop_empty(&self) {
        self.empty_pops.incr();
    }

    fn record_cas_retry(&self) {
        self.cas_retries.incr();
    }

    fn record_clean(&self) {
        self.cleans.incr();
    }
}

impl MetricsSnapshotProvider<StackMetricsSnapshot> for StackMetrics {
    fn snapshot(&self) -> StackMetricsSnapshot {
        StackMetricsSnapshot {
            pushes: self.pushes.get(),
            pops: self.pops.get(),
            empty_pops: self.empty_pops.get(),
            cas_retries: self.cas_retries.get(),
            cleans: self.cleans.get(),
        }
    }
}

impl MetricsReset for StackMetrics {
    fn reset_metrics(&self) {
        self.pushes.reset();
        self.pops.reset();
        self.empty_pops.reset();
        self.cas_retries.reset();
        self.cleans.reset();
    }
}
