use std::path::PathBuf;

use clap::Parser;
use corsim::{config::Config, run, RunOptions};

#[derive(clap::Parser)]
struct Args {
    /// TOML file overriding the default parameters
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    max_ticks: u64,
    /// seed of the initial placement; random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// directory to export the health history to
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long, default_value_t = 30)]
    report_interval: u64,
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let summary = run(
        &config,
        &RunOptions {
            max_ticks: args.max_ticks,
            seed: args.seed,
            out_dir: args.out_dir,
            report_interval: args.report_interval,
        },
    )?;
    tracing::info!(
        "{} ticks, {} transmissions, {}",
        summary.ticks,
        summary.n_transmissions,
        summary.health_count
    );
    Ok(())
}
