//! Command-line arguments for `congestion_report`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cw_runtime::{default_workers, PipelineConfig, WorkerMode};
use cw_views::{TopKConfig, DEFAULT_TOP_K};

use crate::window::{ReportWindow, DEFAULT_END_HOUR, DEFAULT_START_HOUR};
use crate::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report (default)
    Text,
    /// One JSON object per timestamp
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkerModeArg {
    /// Workers forward their shard; the coordinator groups everything
    PassThrough,
    /// Workers group their shard before handing it back
    LocalGroup,
}

impl From<WorkerModeArg> for WorkerMode {
    fn from(arg: WorkerModeArg) -> Self {
        match arg {
            WorkerModeArg::PassThrough => WorkerMode::PassThrough,
            WorkerModeArg::LocalGroup => WorkerMode::LocalGroup,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "congestion_report")]
#[command(version)]
#[command(about = "Rank the most congested traffic signals for each target hour", long_about = None)]
pub struct Cli {
    /// Input file with one `<timestamp> <signal_id> <car_count>` record per line
    #[arg(short, long, value_name = "PATH", default_value = "data.txt")]
    pub input: PathBuf,

    /// Number of parallel workers (defaults to available parallelism)
    #[arg(short, long, value_name = "N", value_parser = parse_positive)]
    pub workers: Option<usize>,

    /// Number of signals listed per timestamp
    #[arg(short = 'k', long = "top-k", value_name = "K", default_value_t = DEFAULT_TOP_K, value_parser = parse_positive)]
    pub top_k: usize,

    /// First reported hour (inclusive)
    #[arg(long, value_name = "HOUR", default_value_t = DEFAULT_START_HOUR)]
    pub start_hour: u32,

    /// Last reported hour (exclusive)
    #[arg(long, value_name = "HOUR", default_value_t = DEFAULT_END_HOUR)]
    pub end_hour: u32,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// What workers return for their shard
    #[arg(long, value_enum, default_value = "local-group")]
    pub worker_mode: WorkerModeArg,

    /// Print a JSON metrics line to stderr after the report
    #[arg(long)]
    pub metrics: bool,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            workers: self.workers.unwrap_or_else(default_workers),
            mode: self.worker_mode.into(),
        }
    }

    pub fn top_k_config(&self) -> TopKConfig {
        TopKConfig { k: self.top_k }
    }

    pub fn window(&self) -> Result<ReportWindow, ReportError> {
        ReportWindow::new(self.start_hour, self.end_hour)
    }
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
