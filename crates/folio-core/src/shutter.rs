//! Page-transition shutter played before a menu jump: it slides up over the
//! page, the jump happens behind it, then it slides off the top.

use crate::constants::{SHUTTER_COVER_MS, SHUTTER_HOLD_MS, SHUTTER_UNCOVER_MS};

/// Where the shutter waits between transitions, just below the viewport.
pub const SHUTTER_PARKED_PERCENT: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutterStep {
    Cover,
    Navigate,
    Uncover,
}

/// Steps keyed by their delay after the click, in ms.
pub const SHUTTER_SEQUENCE: [(i32, ShutterStep); 3] = [
    (0, ShutterStep::Cover),
    (SHUTTER_COVER_MS, ShutterStep::Navigate),
    (SHUTTER_COVER_MS + SHUTTER_HOLD_MS, ShutterStep::Uncover),
];

impl ShutterStep {
    /// Target `translateY` in percent and the transition length, for the
    /// steps that move the shutter.
    pub fn motion(self) -> Option<(f32, i32)> {
        match self {
            ShutterStep::Cover => Some((0.0, SHUTTER_COVER_MS)),
            ShutterStep::Navigate => None,
            ShutterStep::Uncover => Some((-100.0, SHUTTER_UNCOVER_MS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_happens_once_the_page_is_covered() {
        let (cover_at, _) = SHUTTER_SEQUENCE[0];
        let (nav_at, step) = SHUTTER_SEQUENCE[1];
        assert_eq!(step, ShutterStep::Navigate);
        let (_, cover_ms) = ShutterStep::Cover.motion().unwrap();
        assert_eq!(nav_at, cover_at + cover_ms);
        assert_eq!(ShutterStep::Navigate.motion(), None);
    }

    #[test]
    fn shutter_leaves_through_the_top() {
        let (uncover_at, step) = SHUTTER_SEQUENCE[2];
        assert_eq!(step, ShutterStep::Uncover);
        assert_eq!(uncover_at - SHUTTER_SEQUENCE[1].0, SHUTTER_HOLD_MS);
        let (to, _) = step.motion().unwrap();
        assert_eq!(to, -100.0);
        assert_eq!(ShutterStep::Cover.motion().unwrap().0, 0.0);
        assert!(SHUTTER_PARKED_PERCENT > 0.0);
    }
}
