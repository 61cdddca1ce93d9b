//! Presentation boundary.
//!
//! The controller never touches a concrete display. It talks through
//! [`Surface`] (digits, dial, controls, modal -- applied as one whole
//! [`Frame`]) and [`AlarmSink`] (the notification sound). The CLI mounts a
//! terminal implementation; tests mount recording fakes.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::timer::Frame;

/// A mounted presentation surface.
pub trait Surface {
    /// Verify the required elements (display and dial) are present.
    /// Optional elements may be absent -- their actions degrade to no-ops.
    fn probe(&self) -> Result<(), SurfaceError>;

    /// Apply a fully-derived frame. Called after every state mutation.
    fn apply(&mut self, frame: &Frame);
}

/// Best-effort result of playing the notification sound.
///
/// Playback rejection (an autoplay policy, a missing device, a closed
/// stream) is not an error: it is recorded and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum PlaybackOutcome {
    Played,
    Ignored { reason: String },
}

/// The notification sound. Absent sinks are simply never invoked.
pub trait AlarmSink {
    fn play(&mut self) -> PlaybackOutcome;

    /// Stop playback and rewind to the beginning.
    fn rewind(&mut self);
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;

    /// Records every applied frame.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub frames: Vec<Frame>,
        pub missing: Option<&'static str>,
    }

    impl Surface for RecordingSurface {
        fn probe(&self) -> Result<(), SurfaceError> {
            match self.missing {
                Some(name) => Err(SurfaceError::MissingElement { name }),
                None => Ok(()),
            }
        }

        fn apply(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    /// Records play/rewind calls; can be configured to reject playback.
    #[derive(Debug, Default)]
    pub struct RecordingAlarm {
        pub plays: u32,
        pub rewinds: u32,
        pub reject: bool,
    }

    impl AlarmSink for RecordingAlarm {
        fn play(&mut self) -> PlaybackOutcome {
            self.plays += 1;
            if self.reject {
                PlaybackOutcome::Ignored {
                    reason: "playback blocked".into(),
                }
            } else {
                PlaybackOutcome::Played
            }
        }

        fn rewind(&mut self) {
            self.rewinds += 1;
        }
    }
}
