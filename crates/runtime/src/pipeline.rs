use std::num::NonZeroUsize;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use timely::communication::allocator::Generic;
use timely::worker::Worker;
use tracing::{debug, info, warn};

use cw_core::{GroupedIndex, SignalRecord};

use crate::aggregate::aggregate;
use crate::error::PipelineError;
use crate::metrics::MetricsRegistry;
use crate::partition::{partition, Shard};
use crate::run_workers;
use crate::worker::{run_shard, WorkerMode, WorkerOutput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub workers: usize,
    pub mode: WorkerMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            mode: WorkerMode::default(),
        }
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Owns partition, dispatch, the join barrier and the merge. Workers only ever
/// see their own shard.
pub struct Coordinator {
    cfg: PipelineConfig,
    metrics: MetricsRegistry,
}

impl Coordinator {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self::with_metrics(cfg, MetricsRegistry::default())
    }

    pub fn with_metrics(cfg: PipelineConfig, metrics: MetricsRegistry) -> Self {
        Self { cfg, metrics }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn run(&self, records: Vec<SignalRecord>) -> Result<GroupedIndex, PipelineError> {
        let mode = self.cfg.mode;
        self.run_with(records, move |worker, shard| run_shard(worker, shard, mode))
    }

    /// Runs the pipeline with `process` as the per-shard worker task. An `Err`
    /// from any worker fails the run once every worker has finished.
    pub fn run_with<F>(&self, records: Vec<SignalRecord>, process: F) -> Result<GroupedIndex, PipelineError>
    where
        F: Fn(&mut Worker<Generic>, &Shard) -> Result<WorkerOutput, String> + Send + Sync + 'static,
    {
        let expected = records.len();
        self.metrics.inc_records_loaded(expected as u64);
        if expected == 0 {
            warn!("no records loaded; every timestamp will report no data");
        }

        let shards = partition(Arc::from(records), self.cfg.workers)?;
        for shard in &shards {
            let range = shard.range();
            debug!(worker = shard.index(), start = range.start, end = range.end, "shard assigned");
        }
        self.metrics.inc_shards_dispatched(shards.len() as u64);

        let shards = Arc::new(shards);
        let metrics = self.metrics.clone();
        let results = run_workers(self.cfg.workers, move |index, worker| {
            let result = process(worker, &shards[index]);
            if let Ok(output) = &result {
                metrics.inc_records_processed(output.record_count() as u64);
            }
            result
        })?;

        let outputs = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                result.map_err(|reason| {
                    warn!(worker = index, %reason, "worker failed");
                    PipelineError::WorkerFailed { index, reason }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let index = aggregate(outputs);
        let actual = index.record_count();
        if actual != expected {
            return Err(PipelineError::RecordCountMismatch { expected, actual });
        }
        self.metrics.inc_groups_built(index.group_count() as u64);
        info!(
            records = actual,
            groups = index.group_count(),
            workers = self.cfg.workers,
            mode = ?self.cfg.mode,
            "grouped index built"
        );
        Ok(index)
    }
}
