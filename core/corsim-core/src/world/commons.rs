use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::util::math::{Percentage, Point};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamError {
    #[error("{name} must be strictly positive")]
    NonPositiveDuration { name: &'static str },
    #[error("population must not be empty")]
    EmptyPopulation,
    #[error("{n_infected} initially infected exceeds the population of {n_subjects}")]
    TooManyInfected { n_infected: usize, n_subjects: usize },
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveLength { name: &'static str, value: f64 },
    #[error("lockdown rate must be within 0..=100 %, got {0}")]
    InvalidLockdownRate(f64),
    #[error("the arena of {width}x{height} cannot hold a subject of radius {radius}")]
    ArenaTooSmall { width: f64, height: f64, radius: f64 },
    #[error("{name} overflows the simulated clock")]
    DurationOverflow { name: &'static str },
}

/// Latest representable simulated time. `u64::MAX` is reserved for timers that are not running.
pub const MAX_TIME_MS: u64 = u64::MAX - 1;

/// Simulation-wide time constants, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationParams {
    tick_duration_ms: u64,
    infection_to_immunity_duration_ms: u64,
    immunity_duration_ms: u64,
}

impl DurationParams {
    pub fn new(
        tick_duration_ms: u64,
        infection_to_immunity_duration_ms: u64,
        immunity_duration_ms: u64,
    ) -> Result<Self, ParamError> {
        for (name, v) in [
            ("tick_duration_ms", tick_duration_ms),
            (
                "infection_to_immunity_duration_ms",
                infection_to_immunity_duration_ms,
            ),
            ("immunity_duration_ms", immunity_duration_ms),
        ] {
            if v == 0 {
                return Err(ParamError::NonPositiveDuration { name });
            }
            if v > MAX_TIME_MS {
                return Err(ParamError::DurationOverflow { name });
            }
        }
        Ok(Self {
            tick_duration_ms,
            infection_to_immunity_duration_ms,
            immunity_duration_ms,
        })
    }

    /// Both windows given as a whole number of ticks.
    pub fn from_ticks(
        tick_duration_ms: u64,
        incubation_ticks: u64,
        immunity_ticks: u64,
    ) -> Result<Self, ParamError> {
        let to_ms = |ticks: u64, name: &'static str| {
            ticks
                .checked_mul(tick_duration_ms)
                .ok_or(ParamError::DurationOverflow { name })
        };
        Self::new(
            tick_duration_ms,
            to_ms(incubation_ticks, "infection_to_immunity_duration_ms")?,
            to_ms(immunity_ticks, "immunity_duration_ms")?,
        )
    }

    #[inline]
    pub fn tick_duration_ms(&self) -> u64 {
        self.tick_duration_ms
    }

    #[inline]
    pub fn infection_to_immunity_duration_ms(&self) -> u64 {
        self.infection_to_immunity_duration_ms
    }

    #[inline]
    pub fn immunity_duration_ms(&self) -> u64 {
        self.immunity_duration_ms
    }

    /// Simulated time at the beginning of `tick`, clamped to [`MAX_TIME_MS`].
    #[inline]
    pub fn time_of(&self, tick: u64) -> u64 {
        tick.saturating_mul(self.tick_duration_ms).min(MAX_TIME_MS)
    }
}

impl Default for DurationParams {
    fn default() -> Self {
        // 30 frames per second, 90 ticks of incubation and 210 ticks of immunity
        const TICK: u64 = 1000 / 30;
        Self {
            tick_duration_ms: TICK,
            infection_to_immunity_duration_ms: 90 * TICK,
            immunity_duration_ms: 210 * TICK,
        }
    }
}

#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug, Display, EnumCount, EnumIter)]
pub enum HealthType {
    Susceptible,
    Incubating,
    Immune,
}

impl HealthType {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    pub n_subjects: usize,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Share of subjects bound to the lockdown movement.
    pub lockdown_rate: Percentage,
    pub n_infected: usize,
    /// Bound of each velocity component drawn at reset.
    pub max_speed: f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            n_subjects: 200,
            width: 800.0,
            height: 500.0,
            radius: 2.0,
            lockdown_rate: Percentage::new(75.0),
            n_infected: 1,
            max_speed: 1.0,
        }
    }
}

impl WorldParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.n_subjects == 0 {
            return Err(ParamError::EmptyPopulation);
        }
        if self.n_infected > self.n_subjects {
            return Err(ParamError::TooManyInfected {
                n_infected: self.n_infected,
                n_subjects: self.n_subjects,
            });
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamError::NonPositiveLength { name, value });
            }
        }
        self.check_radius(self.radius)?;
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(ParamError::NonPositiveLength {
                name: "max_speed",
                value: self.max_speed,
            });
        }
        if !self.lockdown_rate.is_valid() {
            return Err(ParamError::InvalidLockdownRate(self.lockdown_rate.0));
        }
        Ok(())
    }

    /// Whether a subject of `radius` fits between the walls.
    pub fn check_radius(&self, radius: f64) -> Result<(), ParamError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ParamError::NonPositiveLength {
                name: "radius",
                value: radius,
            });
        }
        if radius * 2.0 > self.width.min(self.height) {
            return Err(ParamError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                radius,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn n_lockdown(&self) -> usize {
        (self.n_subjects as f64 * self.lockdown_rate.r()).floor() as usize
    }

    /// Whether `pt` lies where a subject of this radius fits in the arena.
    pub fn contains(&self, pt: &Point) -> bool {
        (self.radius..=self.width - self.radius).contains(&pt.x)
            && (self.radius..=self.height - self.radius).contains(&pt.y)
    }
}
