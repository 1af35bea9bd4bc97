#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("timely runtime failed to start: {0}")]
    Runtime(String),
    #[error("worker {index} failed: {reason}")]
    WorkerFailed { index: usize, reason: String },
    #[error("grouped index holds {actual} records but {expected} were loaded")]
    RecordCountMismatch { expected: usize, actual: usize },
}
