//! Ground contact and coyote-time tracking.

/// Ground contact of a body, with the jump grace window folded in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GroundState {
    /// Standing on a supporting tile.
    Grounded,
    /// Left the ground without jumping; a jump is still accepted for `remaining` seconds.
    Coyote { remaining: f32 },
    #[default]
    Airborne,
}

impl GroundState {
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, GroundState::Grounded)
    }

    /// Seconds of grace left: the full window while grounded, zero when airborne.
    pub fn coyote_remaining(self, coyote_time: f32) -> f32 {
        match self {
            GroundState::Grounded => coyote_time,
            GroundState::Coyote { remaining } => remaining,
            GroundState::Airborne => 0.0,
        }
    }

    pub fn can_jump(self) -> bool {
        match self {
            GroundState::Grounded => true,
            GroundState::Coyote { remaining } => remaining > 0.0,
            GroundState::Airborne => false,
        }
    }

    /// Ages the grace window at the start of a vertical pass.
    ///
    /// A grounded body keeps its full window; a coyote body loses
    /// `unscaled_dt` and becomes airborne once the window is spent.
    pub fn tick(self, unscaled_dt: f32) -> Self {
        match self {
            GroundState::Coyote { remaining } => Self::coyote(remaining - unscaled_dt),
            other => other,
        }
    }

    /// Drops ground contact before a vertical scan, keeping the grace window.
    pub fn lift(self, coyote_time: f32) -> Self {
        match self {
            GroundState::Grounded => Self::coyote(coyote_time),
            other => other,
        }
    }

    fn coyote(remaining: f32) -> Self {
        if remaining > 0.0 {
            GroundState::Coyote { remaining }
        } else {
            GroundState::Airborne
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_opens_full_window() {
        let s = GroundState::Grounded.lift(0.1);
        assert_eq!(s, GroundState::Coyote { remaining: 0.1 });
        assert!(s.can_jump());
    }

    #[test]
    fn test_window_expires_into_airborne() {
        let mut s = GroundState::Grounded.lift(0.1);
        s = s.tick(0.06);
        assert!(s.can_jump());
        s = s.tick(0.06);
        assert_eq!(s, GroundState::Airborne);
        assert!(!s.can_jump());
        assert_eq!(s.coyote_remaining(0.1), 0.0);
    }

    #[test]
    fn test_zero_coyote_time_never_grants_grace() {
        assert_eq!(GroundState::Grounded.lift(0.0), GroundState::Airborne);
    }

    #[test]
    fn test_tick_leaves_grounded_and_airborne_alone() {
        assert_eq!(GroundState::Grounded.tick(1.0), GroundState::Grounded);
        assert_eq!(GroundState::Airborne.tick(1.0), GroundState::Airborne);
        assert_eq!(GroundState::Airborne.lift(0.1), GroundState::Airborne);
    }
}
