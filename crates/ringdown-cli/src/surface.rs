//! Terminal implementations of the core presentation seams.

use std::io::Write;

use ringdown_core::{AlarmSink, Frame, PlaybackOutcome, StartLabel, Surface, SurfaceError, Treatment};

const BAR_WIDTH: usize = 30;

/// Single-line terminal rendering of the countdown frame: digits, a
/// textual dial bar derived from the stroke offset, and the state label.
/// The urgent treatment switches to the red accent.
pub struct TermSurface {
    modal_shown: bool,
}

impl TermSurface {
    pub fn new() -> Self {
        Self { modal_shown: false }
    }

    fn bar(frame: &Frame) -> String {
        let filled = (frame.dial_fill() * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }
}

impl Surface for TermSurface {
    fn probe(&self) -> Result<(), SurfaceError> {
        // Digits and bar are plain text; the terminal always mounts them.
        Ok(())
    }

    fn apply(&mut self, frame: &Frame) {
        let label = match frame.start_label {
            StartLabel::Start => "ready",
            StartLabel::Running => "running",
            StartLabel::Resume => "paused",
            StartLabel::StartOver => "expired",
        };
        let (color, reset) = match frame.treatment {
            Treatment::Urgent => ("\x1b[31m", "\x1b[0m"),
            Treatment::Normal => ("", ""),
        };

        let mut out = std::io::stdout();
        let _ = write!(
            out,
            "\r{color}{} [{}] {label}   {reset}",
            frame.digits,
            Self::bar(frame),
        );

        if frame.modal_visible && !self.modal_shown {
            self.modal_shown = true;
            let _ = write!(out, "\n\nTime's up!\n");
        } else if !frame.modal_visible {
            self.modal_shown = false;
        }
        let _ = out.flush();
    }
}

impl Default for TermSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal bell as the notification sound. A failed write is ignored,
/// not raised.
#[derive(Debug, Default)]
pub struct BellAlarm;

impl AlarmSink for BellAlarm {
    fn play(&mut self) -> PlaybackOutcome {
        let mut out = std::io::stdout();
        match write!(out, "\x07").and_then(|()| out.flush()) {
            Ok(()) => PlaybackOutcome::Played,
            Err(e) => PlaybackOutcome::Ignored {
                reason: e.to_string(),
            },
        }
    }

    fn rewind(&mut self) {
        // The bell has no playback position.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringdown_core::{Config, Controller, CountdownEngine, Dial, ManualScheduler};

    fn frame_at(total: u32, remaining: u32) -> Frame {
        let mut engine = CountdownEngine::new(total);
        engine.start();
        for _ in 0..(total - remaining) {
            engine.tick();
        }
        Frame::project(&engine, &Dial::default(), 60)
    }

    #[test]
    fn bar_drains_with_the_dial() {
        assert_eq!(TermSurface::bar(&frame_at(600, 600)), "#".repeat(30));
        assert_eq!(TermSurface::bar(&frame_at(600, 300)), format!("{}{}", "#".repeat(15), "-".repeat(15)));
        assert_eq!(TermSurface::bar(&frame_at(600, 0)), "-".repeat(30));
    }

    #[test]
    fn term_surface_mounts() {
        let ctrl = Controller::<_, BellAlarm, _>::mount(
            TermSurface::new(),
            None,
            ManualScheduler::new(),
            &Config::default(),
        );
        assert!(ctrl.is_ok());
    }
}
