//! Hand-pose classification and the gesture cooldown.
//!
//! Landmarks come from the perception oracle (see [`crate::perception`]);
//! this module only turns them into a [`GestureLabel`] and decides whether
//! that label is allowed to trigger a navigation right now.

use std::time::{Duration, Instant};

use story_scenes::GestureLabel;

// ════════════════════════════════════════════════════════════════════════════
// Landmarks
// ════════════════════════════════════════════════════════════════════════════

/// Indices into the 21-point hand model.
pub mod landmarks {
    pub const WRIST:      usize = 0;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP:   usize = 14;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_TIP:  usize = 20;
    pub const COUNT:      usize = 21;
}

/// One landmark in normalised image coordinates (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self { Landmark { x, y, z: 0.0 } }
}

/// A single detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points: [Landmark; landmarks::COUNT],
}

/// (tip, pip) for index, middle, ring, pinky.
const FINGERS: [(usize, usize); 4] = [
    (landmarks::INDEX_TIP,  landmarks::INDEX_PIP),
    (landmarks::MIDDLE_TIP, landmarks::MIDDLE_PIP),
    (landmarks::RING_TIP,   landmarks::RING_PIP),
    (landmarks::PINKY_TIP,  landmarks::PINKY_PIP),
];

impl HandLandmarks {
    /// Extension flags for index, middle, ring, pinky: a finger is extended
    /// when its tip is above its middle joint.
    pub fn extended(&self) -> [bool; 4] {
        FINGERS.map(|(tip, pip)| self.points[tip].y < self.points[pip].y)
    }

    /// Synthetic upright hand showing `label`; `None` gives a closed fist.
    ///
    /// Used by the simulated oracle and by tests.
    pub fn posed(label: GestureLabel) -> Self {
        let up = match label {
            GestureLabel::OpenPalm => [true,  true,  true,  true ],
            GestureLabel::Victory  => [true,  true,  false, false],
            GestureLabel::IndexUp  => [true,  false, false, false],
            GestureLabel::None     => [false, false, false, false],
        };

        let mut points = [Landmark::default(); landmarks::COUNT];
        points[landmarks::WRIST] = Landmark::new(0.5, 0.9);
        // Thumb: tucked alongside the palm.
        for (i, p) in points[1..5].iter_mut().enumerate() {
            *p = Landmark::new(0.38 - i as f32 * 0.03, 0.82 - i as f32 * 0.04);
        }
        for (finger, &extended) in up.iter().enumerate() {
            let base = 5 + finger * 4; // MCP, PIP, DIP, TIP
            let x = 0.42 + finger as f32 * 0.06;
            let ys = if extended {
                [0.70, 0.58, 0.48, 0.38]
            } else {
                [0.70, 0.62, 0.68, 0.74]
            };
            for (j, &y) in ys.iter().enumerate() {
                points[base + j] = Landmark::new(x, y);
            }
        }
        HandLandmarks { points }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification policy
// ════════════════════════════════════════════════════════════════════════════

/// Map a detected hand (or its absence) to a gesture label.
///
/// Rules, first match wins:
///
/// | index | middle | ring | pinky | label |
/// |---|---|---|---|---|
/// | up | up | up | up | `OpenPalm` |
/// | up | up | down | down | `Victory` |
/// | up | down | down | down | `IndexUp` |
/// | anything else, or no hand | | | | `None` |
pub fn classify(hand: Option<&HandLandmarks>) -> GestureLabel {
    let Some(hand) = hand else { return GestureLabel::None };
    match hand.extended() {
        [true, true, true,  true ] => GestureLabel::OpenPalm,
        [true, true, false, false] => GestureLabel::Victory,
        [true, false, false, false] => GestureLabel::IndexUp,
        _ => GestureLabel::None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureDebouncer
// ════════════════════════════════════════════════════════════════════════════

/// Allows at most one gesture-triggered navigation per cooldown window.
#[derive(Clone, Debug)]
pub struct GestureDebouncer {
    cooldown: Duration,
    last:     Option<Instant>,
}

impl GestureDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        GestureDebouncer { cooldown, last: None }
    }

    /// True if `label` may trigger now; the trigger time is then recorded.
    /// `None` never triggers and never resets the window.
    pub fn try_trigger(&mut self, label: GestureLabel, now: Instant) -> bool {
        if label.is_none() {
            return false;
        }
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) <= self.cooldown {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self { GestureDebouncer::new(Duration::from_millis(1500)) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(up: [bool; 4]) -> HandLandmarks {
        let mut h = HandLandmarks::posed(GestureLabel::None);
        for (i, &(tip, pip)) in FINGERS.iter().enumerate() {
            h.points[pip].y = 0.6;
            h.points[tip].y = if up[i] { 0.4 } else { 0.7 };
        }
        h
    }

    // ── classify ─────────────────────────────────────────────────────────
    #[test]
    fn all_fingers_up_is_open_palm() {
        assert_eq!(classify(Some(&hand([true, true, true, true]))), GestureLabel::OpenPalm);
    }

    #[test]
    fn index_and_middle_is_victory() {
        assert_eq!(classify(Some(&hand([true, true, false, false]))), GestureLabel::Victory);
    }

    #[test]
    fn index_only_is_index_up() {
        assert_eq!(classify(Some(&hand([true, false, false, false]))), GestureLabel::IndexUp);
    }

    #[test]
    fn no_hand_is_none() {
        assert_eq!(classify(None), GestureLabel::None);
    }

    #[test]
    fn other_patterns_are_none() {
        for up in [
            [false, false, false, false],
            [false, true,  false, false],
            [true,  true,  true,  false],
            [true,  false, true,  false],
            [true,  true,  false, true ],
            [false, true,  true,  true ],
        ] {
            assert_eq!(classify(Some(&hand(up))), GestureLabel::None, "{:?}", up);
        }
    }

    #[test]
    fn tip_level_with_joint_is_not_extended() {
        let mut h = hand([true, false, false, false]);
        h.points[landmarks::INDEX_TIP].y = h.points[landmarks::INDEX_PIP].y;
        assert_eq!(classify(Some(&h)), GestureLabel::None);
    }

    #[test]
    fn posed_hands_round_trip_through_classifier() {
        for label in [
            GestureLabel::OpenPalm,
            GestureLabel::Victory,
            GestureLabel::IndexUp,
            GestureLabel::None,
        ] {
            let hand = HandLandmarks::posed(label);
            assert_eq!(classify(Some(&hand)), label);
            assert_eq!(hand.points[landmarks::WRIST], Landmark::new(0.5, 0.9));
        }
    }

    // ── debounce ─────────────────────────────────────────────────────────
    #[test]
    fn first_gesture_triggers() {
        let mut d = GestureDebouncer::default();
        assert!(d.try_trigger(GestureLabel::OpenPalm, Instant::now()));
    }

    #[test]
    fn gestures_inside_cooldown_trigger_once() {
        let mut d = GestureDebouncer::new(Duration::from_millis(1500));
        let t0 = Instant::now();
        let fired = [0, 100]
            .iter()
            .filter(|&&ms| d.try_trigger(GestureLabel::Victory, t0 + Duration::from_millis(ms)))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn gestures_past_cooldown_trigger_twice() {
        let mut d = GestureDebouncer::new(Duration::from_millis(1500));
        let t0 = Instant::now();
        assert!(d.try_trigger(GestureLabel::OpenPalm, t0));
        assert!(d.try_trigger(GestureLabel::OpenPalm, t0 + Duration::from_secs(2)));
    }

    #[test]
    fn cooldown_boundary_is_exclusive() {
        let mut d = GestureDebouncer::new(Duration::from_millis(1500));
        let t0 = Instant::now();
        assert!(d.try_trigger(GestureLabel::IndexUp, t0));
        assert!(!d.try_trigger(GestureLabel::IndexUp, t0 + Duration::from_millis(1500)));
        assert!(d.try_trigger(GestureLabel::IndexUp, t0 + Duration::from_millis(1501)));
    }

    #[test]
    fn none_never_triggers_or_restarts_window() {
        let mut d = GestureDebouncer::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(!d.try_trigger(GestureLabel::None, t0));
        assert!(d.try_trigger(GestureLabel::OpenPalm, t0));
        assert!(!d.try_trigger(GestureLabel::None, t0 + Duration::from_secs(5)));
        assert!(d.try_trigger(GestureLabel::OpenPalm, t0 + Duration::from_millis(1100)));
    }
}
