//! Runtime for the congestion pipeline: sharding, timely workers and the merge.

use timely::communication::allocator::Generic;
use timely::worker::Worker;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod aggregate;
pub mod error;
pub mod metrics;
pub mod partition;
pub mod pipeline;
pub mod worker;

pub use aggregate::aggregate;
pub use error::PipelineError;
pub use partition::{partition, shard_ranges, Shard};
pub use pipeline::{default_workers, Coordinator, PipelineConfig};
pub use worker::{drive, run_shard, WorkerMode, WorkerOutput};

/// Installs the stderr subscriber; `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Start a single-process timely runtime with `workers` threads, run `f` once per
/// worker and block until every worker has returned.
///
/// Results come back in worker-index order.
pub fn run_workers<T, F>(workers: usize, f: F) -> Result<Vec<T>, PipelineError>
where
    T: Send + 'static,
    F: Fn(usize, &mut Worker<Generic>) -> T + Send + Sync + 'static,
{
    if workers == 0 {
        return Err(PipelineError::NoWorkers);
    }
    info!(%workers, "starting timely runtime");
    let guards = timely::execute(timely::Config::process(workers), move |worker| {
        let index = worker.index();
        f(index, worker)
    })
    .map_err(PipelineError::Runtime)?;

    guards
        .join()
        .into_iter()
        .enumerate()
        .map(|(index, result)| result.map_err(|reason| PipelineError::WorkerFailed { index, reason }))
        .collect()
}
