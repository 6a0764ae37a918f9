pub mod commons;
pub mod subject;

use rand::{rngs::StdRng, Rng, SeedableRng};

use self::{
    commons::{DurationParams, ParamError, WorldParams},
    subject::Subject,
};
use crate::{
    stat::{HealthCount, Stat},
    util::math::Point,
};

pub struct World {
    world_params: WorldParams,
    durations: DurationParams,
    subjects: Vec<Subject>,
    counter: u64,
    health_count: HealthCount,
    stat: Stat,
    rng: StdRng,
}

impl World {
    /// Creates a world populated at random. The same `seed` always yields the same run.
    pub fn new(
        world_params: WorldParams,
        durations: DurationParams,
        seed: Option<u64>,
    ) -> Result<Self, ParamError> {
        world_params.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut w = Self {
            subjects: Vec::with_capacity(world_params.n_subjects),
            world_params,
            durations,
            counter: 0,
            health_count: HealthCount::default(),
            stat: Stat::default(),
            rng,
        };
        w.reset();
        Ok(w)
    }

    /// Creates a world from subjects placed by the caller.
    pub fn from_subjects(
        world_params: WorldParams,
        durations: DurationParams,
        subjects: Vec<Subject>,
    ) -> Result<Self, ParamError> {
        let world_params = WorldParams {
            n_subjects: subjects.len(),
            n_infected: subjects.iter().filter(|s| s.infected()).count(),
            ..world_params
        };
        world_params.validate()?;
        for s in &subjects {
            world_params.check_radius(s.radius())?;
        }
        let mut w = Self {
            world_params,
            durations,
            subjects,
            counter: 0,
            health_count: HealthCount::default(),
            stat: Stat::default(),
            rng: StdRng::from_entropy(),
        };
        w.record();
        Ok(w)
    }

    pub fn reset(&mut self) {
        let wp = self.world_params;
        let n_lockdown = wp.n_lockdown();
        let first_infected = wp.n_subjects - wp.n_infected;

        self.subjects.clear();
        for idx in 0..wp.n_subjects {
            let x = self.rng.gen_range(wp.radius..=(wp.width - wp.radius));
            let y = self.rng.gen_range(wp.radius..=(wp.height - wp.radius));
            let mut s = Subject::new(x, y, wp.radius, false, self.durations);
            s.set_dx(self.rng.gen_range(-wp.max_speed..=wp.max_speed));
            s.set_dy(self.rng.gen_range(-wp.max_speed..=wp.max_speed));
            if idx >= first_infected {
                s.infect();
                s.start_incubation(0);
            }
            s.select_movement_strategy(idx >= n_lockdown);
            self.subjects.push(s);
        }

        self.counter = 0;
        self.stat.reset();
        self.record();
        tracing::info!(
            "reset {} subjects ({} locked down, {} infected)",
            wp.n_subjects,
            n_lockdown,
            wp.n_infected
        );
    }

    pub fn step(&mut self) {
        self.counter += 1;
        let counter = self.counter;

        for (idx, s) in self.subjects.iter_mut().enumerate() {
            if let Some(t) = s.do_tick(counter) {
                tracing::trace!(idx, counter, "{t:?}");
            }
        }

        for s in &mut self.subjects {
            if s.is_stationary() {
                continue;
            }
            s.advance();
            Self::bounce(s, &self.world_params);
        }

        self.resolve_contacts();
        self.record();
    }

    fn record(&mut self) {
        self.health_count = HealthCount::from_subjects(&self.subjects);
        self.stat.health_stat.push(&self.health_count);
    }

    fn bounce(s: &mut Subject, wp: &WorldParams) {
        let mut pt = *s.pt();
        let mut v = *s.v();
        if let Some(x) = check_bounce(pt.x, s.radius(), wp.width) {
            pt.x = x;
            v.x = -v.x;
        }
        if let Some(y) = check_bounce(pt.y, s.radius(), wp.height) {
            pt.y = y;
            v.y = -v.y;
        }
        s.place(pt);
        s.set_v(v);
    }

    /// Checks every pair once, spreading the infection and separating colliding subjects.
    fn resolve_contacts(&mut self) {
        let counter = self.counter;
        let infectious = self.subjects.iter().map(|s| s.infected()).collect::<Vec<_>>();

        for i in 0..self.subjects.len() {
            let (head, tail) = self.subjects.split_at_mut(i + 1);
            let a = &mut head[i];
            for (k, b) in tail.iter_mut().enumerate() {
                if !a.is_touching(b) {
                    continue;
                }
                let j = i + 1 + k;
                let transmission = match (infectious[i], infectious[j]) {
                    (true, false) => b.transmit_to(counter).then_some((i, j)),
                    (false, true) => a.transmit_to(counter).then_some((j, i)),
                    _ => None,
                };
                if let Some((from, to)) = transmission {
                    self.stat.n_transmissions += 1;
                    tracing::debug!(from, to, counter, "transmission");
                }
                collide(a, b);
            }
        }
    }

    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Read-only view for renderers and statistics.
    #[inline]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    #[inline]
    pub fn health_count(&self) -> &HealthCount {
        &self.health_count
    }

    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn world_params(&self) -> &WorldParams {
        &self.world_params
    }

    pub fn durations(&self) -> &DurationParams {
        &self.durations
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.health_count.n_infected() == 0
    }
}

fn check_bounce(p: f64, radius: f64, size: f64) -> Option<f64> {
    let q = if p < radius {
        radius * 2.0 - p
    } else if p > size - radius {
        (size - radius) * 2.0 - p
    } else {
        return None;
    };
    Some(q.clamp(radius, size - radius))
}

/// Equal-mass elastic response along the line of centers. A stationary
/// subject behaves like a wall. Pairs already moving apart are left alone.
fn collide(a: &mut Subject, b: &mut Subject) {
    let delta = *b.pt() - *a.pt();
    let d = delta.norm();
    if d == 0.0 {
        return;
    }
    let n = delta / d;
    match (a.is_stationary(), b.is_stationary()) {
        (false, false) => {
            let approach = (*a.v() - *b.v()).dot(&n);
            if approach > 0.0 {
                a.set_v(*a.v() - n * approach);
                b.set_v(*b.v() + n * approach);
            }
        }
        (false, true) => reflect(a, n),
        (true, false) => reflect(b, -n),
        (true, true) => {}
    }
}

/// Reflects the velocity of `s` if it heads along `n`.
fn reflect(s: &mut Subject, n: Point) {
    let vn = s.v().dot(&n);
    if vn > 0.0 {
        s.set_v(*s.v() - n * (2.0 * vn));
    }
}
