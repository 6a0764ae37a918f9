pub mod immunity;
pub mod movement;

use self::{
    immunity::{ImmunityClock, Transition},
    movement::MovementStrategy,
};
use super::commons::{DurationParams, HealthType};
use crate::util::math::Point;

/// A circular agent of the simulation which can be infected.
#[derive(Clone, Debug, PartialEq)]
pub struct Subject {
    pt: Point,
    v: Point,
    radius: f64,
    infected: bool,
    immunity: ImmunityClock,
    /// [`None`] moves like [`MovementStrategy::Regular`].
    movement_strategy: Option<MovementStrategy>,
}

impl Subject {
    pub fn new(x: f64, y: f64, radius: f64, infected: bool, durations: DurationParams) -> Self {
        Self {
            pt: Point::new(x, y),
            v: Point::default(),
            radius,
            infected,
            immunity: ImmunityClock::new(durations),
            movement_strategy: None,
        }
    }

    pub fn bind_movement_strategy(&mut self, strategy: MovementStrategy) {
        self.movement_strategy = Some(strategy);
    }

    /// `true` lets the subject move, `false` locks it down.
    pub fn select_movement_strategy(&mut self, moving: bool) {
        self.bind_movement_strategy(MovementStrategy::select(moving));
    }

    #[inline]
    pub fn movement_strategy(&self) -> Option<MovementStrategy> {
        self.movement_strategy
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.movement_strategy.map_or(false, |s| s.is_stationary())
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pt.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pt.y
    }

    #[inline]
    pub fn pt(&self) -> &Point {
        &self.pt
    }

    /// Ignored for a stationary subject.
    pub fn set_x(&mut self, x: f64) {
        if !self.is_stationary() {
            self.pt.x = x;
        }
    }

    /// Ignored for a stationary subject.
    pub fn set_y(&mut self, y: f64) {
        if !self.is_stationary() {
            self.pt.y = y;
        }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.v.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.v.y
    }

    #[inline]
    pub fn v(&self) -> &Point {
        &self.v
    }

    pub fn set_dx(&mut self, dx: f64) {
        self.v.x = dx;
    }

    pub fn set_dy(&mut self, dy: f64) {
        self.v.y = dy;
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn infected(&self) -> bool {
        self.infected
    }

    /// Immune subjects resist exposure. The incubation timer is armed
    /// separately by [`Subject::start_incubation`].
    pub fn infect(&mut self) {
        if !self.is_immune() {
            self.infected = true;
        }
    }

    /// Infects the subject at `counter` and arms its incubation timer.
    /// Returns whether the subject got newly infected.
    pub fn transmit_to(&mut self, counter: u64) -> bool {
        if self.infected || self.is_immune() {
            return false;
        }
        self.infect();
        self.start_incubation(counter);
        true
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.v.angle()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    pub fn do_tick(&mut self, counter: u64) -> Option<Transition> {
        self.immunity.on_tick(counter, &mut self.infected)
    }

    pub fn start_immunity(&mut self, counter: u64) {
        self.immunity.start_immunity(counter);
    }

    pub fn start_incubation(&mut self, counter: u64) {
        self.immunity.start_incubation(counter);
    }

    pub fn end_immunity(&mut self) {
        self.immunity.end_immunity();
    }

    #[inline]
    pub fn is_immune(&self) -> bool {
        self.immunity.is_immune()
    }

    #[inline]
    pub fn immunity(&self) -> &ImmunityClock {
        &self.immunity
    }

    pub fn health(&self) -> HealthType {
        self.immunity.health(self.infected)
    }

    /// Moves the subject by one step of its strategy, through the position setters.
    pub fn advance(&mut self) {
        let strategy = self.movement_strategy.unwrap_or_default();
        let mut pt = self.pt;
        let mut v = self.v;
        strategy.move_body(&mut pt, &mut v, self.infected);
        self.set_x(pt.x);
        self.set_y(pt.y);
        self.v = v;
    }

    /// Places the subject regardless of its strategy. Used to keep it inside the arena.
    pub(in crate::world) fn place(&mut self, pt: Point) {
        self.pt = pt;
    }

    pub(in crate::world) fn set_v(&mut self, v: Point) {
        self.v = v;
    }

    pub fn is_touching(&self, other: &Self) -> bool {
        (other.pt - self.pt).norm() <= self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::{immunity::Transition, movement::MovementStrategy, Subject};
    use crate::world::commons::{DurationParams, HealthType};

    fn durations() -> DurationParams {
        DurationParams::from_ticks(33, 90, 210).unwrap()
    }

    fn subject(x: f64, y: f64) -> Subject {
        Subject::new(x, y, 2.0, false, durations())
    }

    #[test]
    fn test_new_defaults() {
        let s = Subject::new(1.0, 2.0, 3.0, true, durations());
        assert_eq!((s.x(), s.y(), s.radius()), (1.0, 2.0, 3.0));
        assert_eq!((s.dx(), s.dy()), (0.0, 0.0));
        assert!(s.infected());
        assert!(!s.is_immune());
        assert!(!s.immunity().is_armed());
        assert_eq!(s.movement_strategy(), None);
        assert!(!s.is_stationary());
    }

    #[test]
    fn test_unbound_subject_moves() {
        let mut s = subject(5.0, 5.0);
        s.set_x(7.0);
        s.set_y(8.0);
        assert_eq!((s.x(), s.y()), (7.0, 8.0));
    }

    #[test]
    fn test_stationary_ignores_set_position() {
        let mut s = subject(5.0, 5.0);
        s.select_movement_strategy(false);
        assert!(s.is_stationary());
        for _ in 0..100 {
            s.set_x(99.0);
            s.set_y(99.0);
        }
        assert_eq!((s.x(), s.y()), (5.0, 5.0));
    }

    #[test]
    fn test_advance_follows_strategy() {
        let mut s = subject(5.0, 5.0);
        s.set_dx(1.5);
        s.set_dy(-0.5);
        s.advance();
        assert_eq!((s.x(), s.y()), (6.5, 4.5));

        s.bind_movement_strategy(MovementStrategy::Regular);
        s.advance();
        assert_eq!((s.x(), s.y()), (8.0, 4.0));

        s.bind_movement_strategy(MovementStrategy::Lockdown);
        for _ in 0..10 {
            s.advance();
        }
        assert_eq!((s.x(), s.y()), (8.0, 4.0));
        assert_eq!((s.dx(), s.dy()), (1.5, -0.5));
    }

    #[test]
    fn test_angle_and_speed() {
        let mut s = subject(0.0, 0.0);
        s.set_dx(-3.0);
        s.set_dy(4.0);
        assert_eq!(s.speed(), 5.0);
        assert_eq!(s.angle(), 4.0f64.atan2(-3.0));
    }

    #[test]
    fn test_infection_scenario() {
        let mut s = subject(0.0, 0.0);
        s.infect();
        s.start_incubation(0);
        assert_eq!(s.health(), HealthType::Incubating);
        for tick in 1..90 {
            assert_eq!(s.do_tick(tick), None);
        }
        assert!(s.infected() && !s.is_immune());
        assert_eq!(s.do_tick(90), Some(Transition::BecameImmune));
        assert!(!s.infected() && s.is_immune());
        assert_eq!(s.health(), HealthType::Immune);
        for tick in 91..300 {
            s.do_tick(tick);
        }
        assert!(s.is_immune());
        assert_eq!(s.do_tick(300), Some(Transition::LostImmunity));
        assert!(!s.is_immune() && !s.infected());
        assert_eq!(s.health(), HealthType::Susceptible);
    }

    #[test]
    fn test_immune_resists_infection() {
        let mut s = subject(0.0, 0.0);
        s.start_immunity(0);
        s.infect();
        assert!(!s.infected());
        assert!(!s.transmit_to(3));
        assert!(!s.infected());
        assert!(!s.immunity().is_armed());

        s.end_immunity();
        assert!(s.transmit_to(3));
        assert!(s.infected());
        assert_eq!(s.immunity().infection_to_immunity_start(), 99);
    }

    #[test]
    fn test_transmit_to_infected_is_noop() {
        let mut s = subject(0.0, 0.0);
        assert!(s.transmit_to(1));
        let before = s.clone();
        assert!(!s.transmit_to(40));
        assert_eq!(s, before);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut s = subject(1.0, 1.0);
        s.select_movement_strategy(true);
        s.infect();
        s.start_incubation(4);
        let mut c = s.clone();
        assert_eq!(c, s);
        c.do_tick(1_000);
        c.set_x(50.0);
        assert!(c.is_immune());
        assert!(!s.is_immune() && s.infected());
        assert_eq!(s.x(), 1.0);
        assert_eq!(c.movement_strategy(), s.movement_strategy());
    }

    #[test]
    fn test_touching() {
        let a = subject(0.0, 0.0);
        assert!(a.is_touching(&subject(4.0, 0.0)));
        assert!(!a.is_touching(&subject(4.0, 0.1)));
    }
}
