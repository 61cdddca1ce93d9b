mod engine;
mod frame;

pub use engine::{CountdownEngine, TimerState};
pub use frame::{
    format_digits, Dial, Frame, StartLabel, Treatment, DEFAULT_DIAL_RADIUS,
    DEFAULT_URGENT_THRESHOLD_SECS,
};
