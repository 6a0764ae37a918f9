pub mod config;

use std::{fs, path::PathBuf};

use corsim_core::{stat::HealthCount, world::World};

use crate::config::Config;

pub const EXPORT_FILE_NAME: &str = "health.arrow";

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub max_ticks: u64,
    pub seed: Option<u64>,
    /// Where the health history is exported, if anywhere.
    pub out_dir: Option<PathBuf>,
    /// Ticks between two progress reports; zero disables them.
    pub report_interval: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_ticks: 1000,
            seed: None,
            out_dir: None,
            report_interval: 30,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub health_count: HealthCount,
    pub n_transmissions: u64,
    pub exported_to: Option<PathBuf>,
}

/// Runs a world until no subject is infected or `max_ticks` is reached.
pub fn run(config: &Config, opts: &RunOptions) -> anyhow::Result<RunSummary> {
    let mut world = World::new(config.world, config.durations.to_params()?, opts.seed)?;
    while world.counter() < opts.max_ticks && !world.is_ended() {
        world.step();
        if opts.report_interval > 0 && world.counter() % opts.report_interval == 0 {
            tracing::info!("[{}] {}", world.counter(), world.health_count());
        }
    }

    if world.is_ended() {
        tracing::info!("no infected subject left at tick {}", world.counter());
    } else {
        tracing::info!("stopped at tick {}", world.counter());
    }

    let exported_to = match &opts.out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = dir.join(EXPORT_FILE_NAME);
            world.stat().health_stat.export(&path)?;
            Some(path)
        }
        None => None,
    };

    Ok(RunSummary {
        ticks: world.counter(),
        health_count: world.health_count().clone(),
        n_transmissions: world.stat().n_transmissions,
        exported_to,
    })
}
