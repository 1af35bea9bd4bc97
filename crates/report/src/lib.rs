//! Report driver: ranks each target timestamp and renders the result.

use anyhow::{Context, Result};
use tracing::info;

use cw_core::{load_records, GroupedIndex};
use cw_runtime::metrics::MetricsRegistry;
use cw_runtime::Coordinator;
use cw_views::{rank_top_k, RankOutcome, TopKConfig};

pub mod cli;
pub mod render;
pub mod window;

use cli::{Cli, OutputFormat};

pub use render::{render_json, render_text};
pub use window::ReportWindow;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("invalid report window {start}..{end}: hours must satisfy start <= end <= 24")]
    InvalidWindow { start: u32, end: u32 },
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampReport {
    pub timestamp: String,
    pub outcome: RankOutcome,
}

/// Ranks every target in the given order; data order plays no part.
pub fn build_report(index: &GroupedIndex, targets: &[String], cfg: &TopKConfig) -> Vec<TimestampReport> {
    targets
        .iter()
        .map(|timestamp| {
            let outcome = rank_top_k(index, timestamp, cfg);
            if outcome == RankOutcome::NoData {
                info!(%timestamp, "no data available");
            }
            TimestampReport {
                timestamp: timestamp.clone(),
                outcome,
            }
        })
        .collect()
}

/// Load, aggregate, rank and render in one pass. Nothing is rendered if any
/// stage before ranking fails.
pub fn execute(cli: &Cli, metrics: &MetricsRegistry) -> Result<String> {
    let window = cli.window()?;
    let records = load_records(&cli.input)
        .with_context(|| format!("failed to load records from {}", cli.input.display()))?;

    let coordinator = Coordinator::with_metrics(cli.pipeline_config(), metrics.clone());
    let index = coordinator
        .run(records)
        .context("aggregation pipeline failed")?;

    let cfg = cli.top_k_config();
    let reports = build_report(&index, &window.target_timestamps(), &cfg);
    for report in &reports {
        match report.outcome {
            RankOutcome::NoData => metrics.inc_timestamps_missing(1),
            RankOutcome::Ranked(_) => metrics.inc_timestamps_ranked(1),
        }
    }

    match cli.format {
        OutputFormat::Text => Ok(render_text(&reports, cfg.k)),
        OutputFormat::Json => Ok(render_json(&reports)?),
    }
}
