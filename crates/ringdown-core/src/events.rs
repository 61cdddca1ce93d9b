use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TimerState;

/// Every state change in the session produces an Event.
/// The CLI prints them; drivers may subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Started {
        session_id: Uuid,
        remaining_secs: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Reset {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Emitted exactly once per session run.
    Expired {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    /// Completion modal dismissed without altering timer state.
    ModalDismissed {
        at: DateTime<Utc>,
    },
    Snapshot {
        session_id: Uuid,
        state: TimerState,
        remaining_secs: u32,
        total_secs: u32,
        digits: String,
        modal_visible: bool,
        at: DateTime<Utc>,
    },
}
