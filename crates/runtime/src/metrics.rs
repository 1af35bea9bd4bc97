use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    records_loaded: AtomicU64,
    shards_dispatched: AtomicU64,
    records_processed: AtomicU64,
    groups_built: AtomicU64,
    timestamps_ranked: AtomicU64,
    timestamps_missing: AtomicU64,
}

impl MetricsRegistry {
    pub fn inc_records_loaded(&self, delta: u64) {
        self.inner.records_loaded.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_shards_dispatched(&self, delta: u64) {
        self.inner.shards_dispatched.fetch_add(delta, Ordering::Relaxed);
    }

    /// Called from worker threads.
    pub fn inc_records_processed(&self, delta: u64) {
        self.inner.records_processed.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_groups_built(&self, delta: u64) {
        self.inner.groups_built.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_timestamps_ranked(&self, delta: u64) {
        self.inner.timestamps_ranked.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_timestamps_missing(&self, delta: u64) {
        self.inner.timestamps_missing.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_loaded: self.inner.records_loaded.load(Ordering::Relaxed),
            shards_dispatched: self.inner.shards_dispatched.load(Ordering::Relaxed),
            records_processed: self.inner.records_processed.load(Ordering::Relaxed),
            groups_built: self.inner.groups_built.load(Ordering::Relaxed),
            timestamps_ranked: self.inner.timestamps_ranked.load(Ordering::Relaxed),
            timestamps_missing: self.inner.timestamps_missing.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub shards_dispatched: u64,
    pub records_processed: u64,
    pub groups_built: u64,
    pub timestamps_ranked: u64,
    pub timestamps_missing: u64,
}

impl MetricsSnapshot {
    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            #[serde(flatten)]
            snapshot: &'a MetricsSnapshot,
            elapsed_ms: Option<u128>,
        }

        let payload = Line {
            label,
            snapshot: self,
            elapsed_ms: elapsed.map(|d| d.as_millis()),
        };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct StageTimer {
    start: Instant,
}

impl StageTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
