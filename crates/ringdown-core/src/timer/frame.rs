//! Pure projection from engine state to a presentation frame.
//!
//! Everything here is re-derivable from the current state -- nothing is
//! incrementally accumulated, so re-rendering is always consistent with
//! `remaining_secs` and projecting twice yields identical frames.

use serde::{Deserialize, Serialize};

use super::engine::{CountdownEngine, TimerState};

/// Radius of the circular indicator, matching the original SVG geometry.
pub const DEFAULT_DIAL_RADIUS: f64 = 140.0;

/// Below this many remaining seconds the display switches to the urgent
/// color treatment.
pub const DEFAULT_URGENT_THRESHOLD_SECS: u32 = 60;

/// Circular indicator geometry. The visual "draining" effect is a
/// stroke-dash offset swept linearly across the circumference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dial {
    radius: f64,
}

impl Dial {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    /// `circumference * (1 - remaining/total)`: zero offset with full time
    /// remaining, full circumference at expiry.
    pub fn offset(&self, remaining_secs: u32, total_secs: u32) -> f64 {
        let c = self.circumference();
        if total_secs == 0 {
            return c;
        }
        c * (1.0 - f64::from(remaining_secs) / f64::from(total_secs))
    }
}

impl Default for Dial {
    fn default() -> Self {
        Self::new(DEFAULT_DIAL_RADIUS)
    }
}

/// Color treatment for the digits and the dial stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Treatment {
    Normal,
    Urgent,
}

/// Label shown on the start control, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartLabel {
    Start,
    Running,
    Resume,
    StartOver,
}

/// One fully-derived presentation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub digits: String,
    pub dial_offset: f64,
    pub circumference: f64,
    pub treatment: Treatment,
    pub start_label: StartLabel,
    pub stop_enabled: bool,
    pub modal_visible: bool,
}

impl Frame {
    pub fn project(engine: &CountdownEngine, dial: &Dial, urgent_threshold_secs: u32) -> Self {
        let remaining = engine.remaining_secs();
        let treatment = if remaining < urgent_threshold_secs {
            Treatment::Urgent
        } else {
            Treatment::Normal
        };
        let start_label = match engine.state() {
            TimerState::Idle => StartLabel::Start,
            TimerState::Running => StartLabel::Running,
            TimerState::Paused => StartLabel::Resume,
            TimerState::Expired => StartLabel::StartOver,
        };
        Self {
            digits: format_digits(remaining),
            dial_offset: dial.offset(remaining, engine.total_secs()),
            circumference: dial.circumference(),
            treatment,
            start_label,
            stop_enabled: engine.state() == TimerState::Running,
            modal_visible: engine.modal_visible(),
        }
    }

    /// Fraction of the dial still drawn, 0.0 at expiry to 1.0 when full.
    pub fn dial_fill(&self) -> f64 {
        if self.circumference == 0.0 {
            return 0.0;
        }
        1.0 - self.dial_offset / self.circumference
    }
}

/// Zero-padded `MM:SS` via integer division/modulo by 60.
pub fn format_digits(remaining_secs: u32) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine_at(total: u32, remaining: u32) -> CountdownEngine {
        let mut engine = CountdownEngine::new(total);
        engine.start();
        for _ in 0..(total - remaining) {
            engine.tick();
        }
        engine
    }

    #[test]
    fn digits_are_zero_padded() {
        assert_eq!(format_digits(600), "10:00");
        assert_eq!(format_digits(60), "01:00");
        assert_eq!(format_digits(59), "00:59");
        assert_eq!(format_digits(9), "00:09");
        assert_eq!(format_digits(0), "00:00");
    }

    #[test]
    fn offset_is_the_exact_linear_sweep() {
        let dial = Dial::default();
        let c = dial.circumference();
        assert_eq!(dial.offset(600, 600), 0.0);
        assert_eq!(dial.offset(0, 600), c);
        assert_eq!(dial.offset(300, 600), c * 0.5);
    }

    #[test]
    fn urgent_treatment_below_sixty_seconds() {
        let dial = Dial::default();
        let normal = Frame::project(&engine_at(600, 60), &dial, DEFAULT_URGENT_THRESHOLD_SECS);
        assert_eq!(normal.treatment, Treatment::Normal);
        assert_eq!(normal.digits, "01:00");

        let urgent = Frame::project(&engine_at(600, 59), &dial, DEFAULT_URGENT_THRESHOLD_SECS);
        assert_eq!(urgent.treatment, Treatment::Urgent);
        assert_eq!(urgent.digits, "00:59");
    }

    #[test]
    fn projection_is_idempotent() {
        let dial = Dial::default();
        let engine = engine_at(600, 123);
        let a = Frame::project(&engine, &dial, DEFAULT_URGENT_THRESHOLD_SECS);
        let b = Frame::project(&engine, &dial, DEFAULT_URGENT_THRESHOLD_SECS);
        assert_eq!(a, b);
    }

    #[test]
    fn start_label_tracks_state() {
        let dial = Dial::default();
        let mut engine = CountdownEngine::new(2);
        let label = |e: &CountdownEngine| {
            Frame::project(e, &dial, DEFAULT_URGENT_THRESHOLD_SECS).start_label
        };

        assert_eq!(label(&engine), StartLabel::Start);
        engine.start();
        assert_eq!(label(&engine), StartLabel::Running);
        engine.stop();
        assert_eq!(label(&engine), StartLabel::Resume);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(label(&engine), StartLabel::StartOver);
    }

    proptest! {
        #[test]
        fn offset_matches_formula_for_all_remaining(remaining in 0u32..=600) {
            let dial = Dial::default();
            let c = dial.circumference();
            let expected = c * (1.0 - f64::from(remaining) / 600.0);
            prop_assert_eq!(dial.offset(remaining, 600), expected);
        }

        #[test]
        fn offset_stays_within_the_circumference(
            remaining in 0u32..=10_000,
            total in 1u32..=10_000,
        ) {
            prop_assume!(remaining <= total);
            let dial = Dial::default();
            let offset = dial.offset(remaining, total);
            prop_assert!(offset >= 0.0);
            prop_assert!(offset <= dial.circumference());
        }

        #[test]
        fn offset_grows_as_time_drains(remaining in 1u32..=600) {
            let dial = Dial::default();
            prop_assert!(dial.offset(remaining - 1, 600) > dial.offset(remaining, 600));
        }
    }
}
