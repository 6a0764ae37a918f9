use std::{fs, io, path::Path};

use corsim_core::world::commons::{DurationParams, ParamError, WorldParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read the config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Run configuration. Every missing key falls back to its default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldParams,
    pub durations: DurationConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    pub tick_ms: u64,
    pub incubation_ticks: u64,
    pub immunity_ticks: u64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000 / 30,
            incubation_ticks: 90,
            immunity_ticks: 210,
        }
    }
}

impl DurationConfig {
    pub fn to_params(&self) -> Result<DurationParams, ParamError> {
        DurationParams::from_ticks(self.tick_ms, self.incubation_ticks, self.immunity_ticks)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse(&fs::read_to_string(path)?)?;
        tracing::debug!("loaded {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        self.world.validate()?;
        self.durations.to_params()?;
        Ok(())
    }
}
