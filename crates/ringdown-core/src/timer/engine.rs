//! Countdown state machine.
//!
//! The engine is purely tick-driven. It does not schedule anything -- the
//! caller (normally [`crate::controller::Controller`]) delivers one `tick()`
//! per elapsed second and owns the periodic callback handle.
//!
//! ## State Transitions
//!
//! ```text
//! Idle/Paused --start()--> Running
//! Running --stop()--> Paused
//! Running --tick() reaching 0--> Expired
//! {Running, Paused, Expired} --reset()--> Idle
//! ```
//!
//! `start()` is a no-op while Running; `stop()` is a no-op everywhere but
//! Running; `reset()` is available from every state and always succeeds.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frame::format_digits;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Core countdown engine.
///
/// `remaining_secs` is mutated only by `tick()` and `reset()`. One tick is
/// exactly one decrement; wall-clock catch-up is a driver concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    session_id: Uuid,
    total_secs: u32,
    remaining_secs: u32,
    state: TimerState,
    /// Completion modal dismissed by the user. Cleared on reset.
    #[serde(default)]
    modal_dismissed: bool,
}

impl CountdownEngine {
    /// Create a new session with the full duration remaining.
    pub fn new(total_secs: u32) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            total_secs,
            remaining_secs: total_secs,
            state: TimerState::Idle,
            modal_dismissed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// The completion modal is visible iff the session expired and the
    /// user has not dismissed it.
    pub fn modal_visible(&self) -> bool {
        self.state == TimerState::Expired && !self.modal_dismissed
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::Snapshot {
            session_id: self.session_id,
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            digits: format_digits(self.remaining_secs),
            modal_visible: self.modal_visible(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::Started {
                    session_id: self.session_id,
                    remaining_secs: self.remaining_secs,
                    total_secs: self.total_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or expired (reset is the path back).
            TimerState::Running | TimerState::Expired => None,
        }
    }

    /// Pause semantics: remaining time is left untouched.
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::Paused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs;
        self.modal_dismissed = false;
        Some(Event::Reset {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Deliver one elapsed second. Returns `Some(Event::Expired)` exactly
    /// once, on the tick that reaches zero. Ticks outside Running are
    /// ignored, so a late tick can never drive the count negative.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            return Some(Event::Expired {
                session_id: self.session_id,
                at: Utc::now(),
            });
        }
        None
    }

    /// Hide the completion modal. Timer state is untouched.
    pub fn dismiss_modal(&mut self) -> Option<Event> {
        if !self.modal_visible() {
            return None;
        }
        self.modal_dismissed = true;
        Some(Event::ModalDismissed { at: Utc::now() })
    }
}
