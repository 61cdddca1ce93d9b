//! Countdown controller: engine + surface + alarm + scheduler wiring.
//!
//! The controller is the single owner of the periodic-callback handle.
//! Invariant: `tick_handle` is `Some` iff the engine is Running. Every
//! command cancels or creates the exact handle it owns, so two decrement
//! streams can never coexist.

use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::scheduler::{TickHandle, TickScheduler};
use crate::storage::Config;
use crate::surface::{AlarmSink, PlaybackOutcome, Surface};
use crate::timer::{CountdownEngine, Dial, Frame};

pub struct Controller<S, A, T>
where
    S: Surface,
    A: AlarmSink,
    T: TickScheduler,
{
    engine: CountdownEngine,
    dial: Dial,
    urgent_threshold_secs: u32,
    tick_period: Duration,
    surface: S,
    alarm: Option<A>,
    scheduler: T,
    tick_handle: Option<TickHandle>,
    last_playback: Option<PlaybackOutcome>,
}

impl<S, A, T> Controller<S, A, T>
where
    S: Surface,
    A: AlarmSink,
    T: TickScheduler,
{
    /// Mount the controller onto a surface.
    ///
    /// Probes the surface first: a missing required element aborts here
    /// with no partial state. On success the initial frame is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Surface`] if the display or dial element is
    /// absent.
    pub fn mount(surface: S, alarm: Option<A>, scheduler: T, config: &Config) -> Result<Self> {
        surface.probe().map_err(CoreError::Surface)?;
        let mut controller = Self {
            engine: CountdownEngine::new(config.session.total_secs),
            dial: Dial::new(config.dial.radius),
            urgent_threshold_secs: config.session.urgent_threshold_secs,
            tick_period: Duration::from_millis(config.session.tick_ms),
            surface,
            alarm,
            scheduler,
            tick_handle: None,
            last_playback: None,
        };
        controller.render();
        Ok(controller)
    }

    /// Mount over an existing engine (a restored session).
    pub fn mount_with_engine(
        engine: CountdownEngine,
        surface: S,
        alarm: Option<A>,
        scheduler: T,
        config: &Config,
    ) -> Result<Self> {
        let mut controller = Self::mount(surface, alarm, scheduler, config)?;
        controller.engine = engine;
        // A restored Running engine has no live callback yet; stop it so
        // the handle invariant holds and start() resumes it.
        controller.engine.stop();
        controller.render();
        Ok(controller)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn frame(&self) -> Frame {
        Frame::project(&self.engine, &self.dial, self.urgent_threshold_secs)
    }

    pub fn is_scheduled(&self) -> bool {
        self.tick_handle.is_some()
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Outcome of the most recent alarm playback attempt, if any.
    /// `Ignored` outcomes are recorded here instead of surfacing as errors.
    pub fn last_playback(&self) -> Option<&PlaybackOutcome> {
        self.last_playback.as_ref()
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn alarm(&self) -> Option<&A> {
        self.alarm.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        // The sole concurrency hazard: double-scheduling. Guarded here,
        // independent of any UI-side control disablement.
        if self.tick_handle.is_some() {
            return None;
        }
        let event = self.engine.start()?;
        self.tick_handle = Some(self.scheduler.schedule(self.tick_period));
        self.render();
        Some(event)
    }

    /// Deliver one scheduled tick. Ticks arriving after cancellation are
    /// ignored.
    pub fn on_tick(&mut self) -> Option<Event> {
        self.tick_handle?;
        let event = self.engine.tick();
        if matches!(event, Some(Event::Expired { .. })) {
            self.cancel_ticks();
            self.last_playback = self.alarm.as_mut().map(|alarm| {
                alarm.rewind();
                alarm.play()
            });
        }
        self.render();
        event
    }

    pub fn stop(&mut self) -> Option<Event> {
        let event = self.engine.stop()?;
        self.cancel_ticks();
        self.render();
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_ticks();
        let event = self.engine.reset();
        if let Some(alarm) = self.alarm.as_mut() {
            alarm.rewind();
        }
        self.render();
        event
    }

    pub fn dismiss_modal(&mut self) -> Option<Event> {
        let event = self.engine.dismiss_modal()?;
        if let Some(alarm) = self.alarm.as_mut() {
            alarm.rewind();
        }
        self.render();
        Some(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_ticks(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn render(&mut self) {
        let frame = Frame::project(&self.engine, &self.dial, self.urgent_threshold_secs);
        self.surface.apply(&frame);
    }
}
