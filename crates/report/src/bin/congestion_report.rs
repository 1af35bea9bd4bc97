use anyhow::Result;
use clap::Parser;
use tracing::info;

use cw_report::cli::Cli;
use cw_report::execute;
use cw_runtime::init_tracing;
use cw_runtime::metrics::{MetricsRegistry, StageTimer};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!(input = %cli.input.display(), "congestion_report starting");

    let metrics = MetricsRegistry::default();
    let timer = StageTimer::start();
    let report = execute(&cli, &metrics)?;
    print!("{report}");

    let snapshot = metrics.snapshot();
    info!(?snapshot, "final metrics summary");
    if cli.metrics {
        eprintln!("{}", snapshot.to_json_line("congestion_report", Some(timer.elapsed())));
    }
    Ok(())
}
