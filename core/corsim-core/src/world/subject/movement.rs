use crate::util::math::Point;

/// How a subject is allowed to move.
///
/// Both variants are stateless, so one value can be bound to any number of subjects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementStrategy {
    /// Translates freely along the velocity.
    #[default]
    Regular,
    /// Stands still whatever the velocity is.
    Lockdown,
}

impl MovementStrategy {
    /// `true` selects [`MovementStrategy::Regular`], `false` selects [`MovementStrategy::Lockdown`].
    pub fn select(moving: bool) -> Self {
        if moving {
            Self::Regular
        } else {
            Self::Lockdown
        }
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        matches!(self, Self::Lockdown)
    }

    pub fn move_body(&self, pt: &mut Point, v: &mut Point, _infected: bool) {
        match self {
            Self::Regular => *pt += *v,
            Self::Lockdown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MovementStrategy;
    use crate::util::math::Point;

    #[test]
    fn test_select() {
        assert_eq!(MovementStrategy::select(true), MovementStrategy::Regular);
        assert_eq!(MovementStrategy::select(false), MovementStrategy::Lockdown);
        assert!(MovementStrategy::Lockdown.is_stationary());
        assert!(!MovementStrategy::Regular.is_stationary());
        assert_eq!(MovementStrategy::default(), MovementStrategy::Regular);
    }

    #[test]
    fn test_regular_translates() {
        for infected in [false, true] {
            let mut pt = Point::new(1.0, 2.0);
            let mut v = Point::new(0.5, -1.5);
            MovementStrategy::Regular.move_body(&mut pt, &mut v, infected);
            assert_eq!(pt, Point::new(1.5, 0.5));
            assert_eq!(v, Point::new(0.5, -1.5));
        }
    }

    #[test]
    fn test_lockdown_is_noop() {
        for infected in [false, true] {
            let mut pt = Point::new(1.0, 2.0);
            let mut v = Point::new(0.5, -1.5);
            for _ in 0..10 {
                MovementStrategy::Lockdown.move_body(&mut pt, &mut v, infected);
            }
            assert_eq!(pt, Point::new(1.0, 2.0));
            assert_eq!(v, Point::new(0.5, -1.5));
        }
    }
}
