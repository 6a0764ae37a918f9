use crate::world::commons::{DurationParams, HealthType, MAX_TIME_MS};

/// Timestamp of a timer that is not running. No tick ever reaches it.
pub const UNSET: u64 = MAX_TIME_MS + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    BecameImmune,
    LostImmunity,
}

/// Infection-to-immunity and immunity windows of a single subject.
///
/// All timestamps are absolute simulated times in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImmunityClock {
    is_immune: bool,
    infection_to_immunity_start: u64,
    infection_to_immunity_end: u64,
    immunity_start: u64,
    immunity_end: u64,
    durations: DurationParams,
}

impl ImmunityClock {
    pub fn new(durations: DurationParams) -> Self {
        Self {
            is_immune: false,
            infection_to_immunity_start: UNSET,
            infection_to_immunity_end: UNSET,
            immunity_start: UNSET,
            immunity_end: UNSET,
            durations,
        }
    }

    /// Arms both windows from `tick` on. Ignored while immune, so a
    /// re-exposure never extends an immunity already granted.
    pub fn start_incubation(&mut self, tick: u64) {
        if self.is_immune {
            return;
        }
        let start = self.durations.time_of(tick);
        self.infection_to_immunity_start = start;
        self.infection_to_immunity_end =
            add_time(start, self.durations.infection_to_immunity_duration_ms());
        self.immunity_start = self.infection_to_immunity_end;
        self.immunity_end = add_time(self.immunity_start, self.durations.immunity_duration_ms());
    }

    pub fn start_immunity(&mut self, _tick: u64) {
        self.is_immune = true;
    }

    pub fn end_immunity(&mut self) {
        self.infection_to_immunity_start = UNSET;
        self.infection_to_immunity_end = UNSET;
        self.immunity_start = UNSET;
        self.immunity_end = UNSET;
        self.is_immune = false;
    }

    /// Advances the clock to `tick`. At most one transition happens per call.
    pub fn on_tick(&mut self, tick: u64, infected: &mut bool) -> Option<Transition> {
        let now = self.durations.time_of(tick);
        if *infected && !self.is_immune {
            if now >= self.infection_to_immunity_end {
                self.start_immunity(tick);
                *infected = false;
                return Some(Transition::BecameImmune);
            }
        } else if self.is_immune && now >= self.immunity_end {
            self.end_immunity();
            return Some(Transition::LostImmunity);
        }
        None
    }

    #[inline]
    pub fn is_immune(&self) -> bool {
        self.is_immune
    }

    /// Whether an infection-to-immunity window has been started.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.infection_to_immunity_end != UNSET
    }

    pub fn health(&self, infected: bool) -> HealthType {
        if self.is_immune {
            HealthType::Immune
        } else if infected {
            HealthType::Incubating
        } else {
            HealthType::Susceptible
        }
    }

    pub fn durations(&self) -> &DurationParams {
        &self.durations
    }

    pub fn infection_to_immunity_start(&self) -> u64 {
        self.infection_to_immunity_start
    }

    pub fn infection_to_immunity_end(&self) -> u64 {
        self.infection_to_immunity_end
    }

    pub fn immunity_start(&self) -> u64 {
        self.immunity_start
    }

    pub fn immunity_end(&self) -> u64 {
        self.immunity_end
    }
}

fn add_time(t: u64, d: u64) -> u64 {
    t.saturating_add(d).min(MAX_TIME_MS)
}
