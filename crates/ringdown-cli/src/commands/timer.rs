use chrono::{Duration as ChronoDuration, Utc};
use clap::Subcommand;
use ringdown_core::storage::{Config, SessionStore, StoredSession};
use ringdown_core::{Controller, CountdownEngine, Event, IntervalScheduler, TimerState};

use crate::surface::{BellAlarm, TermSurface};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown, keeping the remaining time
    Stop,
    /// Return to idle with the full duration remaining
    Reset,
    /// Print the current session state as JSON
    Status,
    /// Dismiss the completion modal
    Dismiss,
    /// Run the countdown live in the terminal until it expires
    Run {
        /// Override the configured session duration in seconds
        #[arg(long)]
        total_secs: Option<u32>,
    },
}

fn load_session(store: &SessionStore, config: &Config) -> StoredSession {
    store.load().unwrap_or_else(|| StoredSession {
        engine: CountdownEngine::new(config.session.total_secs),
        last_tick_at: None,
    })
}

/// Deliver the ticks owed since the last invocation: one per whole
/// elapsed second while running, capped at the remaining count so expiry
/// fires exactly once. Returns the expiry event if it was crossed.
fn catch_up(session: &mut StoredSession) -> Option<Event> {
    let last = session.last_tick_at?;
    let now = Utc::now();
    let owed = u32::try_from((now - last).num_seconds().max(0)).unwrap_or(u32::MAX);
    let owed = owed.min(session.engine.remaining_secs());

    let mut expired = None;
    for _ in 0..owed {
        if let Some(event) = session.engine.tick() {
            expired = Some(event);
        }
    }
    session.last_tick_at = if session.engine.state() == TimerState::Running {
        Some(last + ChronoDuration::seconds(i64::from(owed)))
    } else {
        None
    };
    expired
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    if let TimerAction::Run { total_secs } = action {
        return run_live(total_secs);
    }

    let config = Config::load_or_default();
    let store = SessionStore::open()?;
    let mut session = load_session(&store, &config);

    if let Some(expired) = catch_up(&mut session) {
        print_event(&expired)?;
    }

    match action {
        TimerAction::Start => {
            if let Some(event) = session.engine.start() {
                session.last_tick_at = Some(Utc::now());
                print_event(&event)?;
            } else {
                print_event(&session.engine.snapshot())?;
            }
        }
        TimerAction::Stop => {
            if let Some(event) = session.engine.stop() {
                session.last_tick_at = None;
                print_event(&event)?;
            } else {
                print_event(&session.engine.snapshot())?;
            }
        }
        TimerAction::Reset => {
            session.last_tick_at = None;
            if let Some(event) = session.engine.reset() {
                print_event(&event)?;
            }
        }
        TimerAction::Dismiss => {
            if let Some(event) = session.engine.dismiss_modal() {
                print_event(&event)?;
            } else {
                print_event(&session.engine.snapshot())?;
            }
        }
        TimerAction::Status => {
            print_event(&session.engine.snapshot())?;
        }
        TimerAction::Run { .. } => unreachable!("handled above"),
    }

    store.save(&session)?;
    Ok(())
}

/// Live mode: full controller, real interval scheduler, terminal surface.
fn run_live(total_secs: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if let Some(total) = total_secs {
        config.session.total_secs = total;
    }
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let (scheduler, mut ticks) = IntervalScheduler::new();
        let alarm = config.alarm.enabled.then(BellAlarm::default);
        let mut controller = Controller::mount(TermSurface::new(), alarm, scheduler, &config)?;

        controller.start();
        while controller.engine().state() == TimerState::Running {
            if ticks.recv().await.is_none() {
                break;
            }
            controller.on_tick();
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    })?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_up_is_inert_while_not_running() {
        let mut session = StoredSession {
            engine: CountdownEngine::new(600),
            last_tick_at: None,
        };
        assert!(catch_up(&mut session).is_none());
        assert_eq!(session.engine.remaining_secs(), 600);
    }

    #[test]
    fn catch_up_delivers_whole_elapsed_seconds() {
        let mut engine = CountdownEngine::new(600);
        engine.start();
        let mut session = StoredSession {
            engine,
            last_tick_at: Some(Utc::now() - ChronoDuration::seconds(90)),
        };
        assert!(catch_up(&mut session).is_none());
        assert_eq!(session.engine.remaining_secs(), 510);
        assert!(session.last_tick_at.is_some());
    }

    #[test]
    fn catch_up_caps_at_expiry() {
        let mut engine = CountdownEngine::new(30);
        engine.start();
        let mut session = StoredSession {
            engine,
            last_tick_at: Some(Utc::now() - ChronoDuration::seconds(1000)),
        };
        let event = catch_up(&mut session);
        assert!(matches!(event, Some(Event::Expired { .. })));
        assert_eq!(session.engine.remaining_secs(), 0);
        assert_eq!(session.engine.state(), TimerState::Expired);
        assert!(session.last_tick_at.is_none());

        // A second catch-up has nothing left to deliver.
        assert!(catch_up(&mut session).is_none());
        assert_eq!(session.engine.remaining_secs(), 0);
    }
}
