//! # Ringdown Core Library
//!
//! Core logic for the Ringdown countdown timer. It implements a CLI-first
//! philosophy: every operation is available through a standalone CLI
//! binary, and any richer presentation layer is a thin surface over the
//! same library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a purely tick-driven state machine
//!   (Idle/Running/Paused/Expired); the caller delivers one `tick()` per
//!   elapsed second
//! - **Frame projection**: digits, dial stroke offset and color treatment
//!   derived freshly from state on every render
//! - **Controller**: owns the periodic-callback handle and the surface,
//!   guaranteeing a single decrement stream
//! - **Scheduler**: injectable periodic-tick capability; deterministic in
//!   tests, tokio-interval-backed in the CLI
//! - **Storage**: TOML configuration and a JSON session snapshot
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: core state machine
//! - [`Controller`]: engine/surface/scheduler wiring
//! - [`Frame`]: pure presentation projection
//! - [`Config`]: application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod storage;
pub mod surface;
pub mod timer;

pub use controller::Controller;
pub use error::{ConfigError, CoreError, SurfaceError};
pub use events::Event;
pub use scheduler::{IntervalScheduler, ManualScheduler, TickHandle, TickScheduler};
pub use storage::{Config, SessionStore, StoredSession};
pub use surface::{AlarmSink, PlaybackOutcome, Surface};
pub use timer::{CountdownEngine, Dial, Frame, StartLabel, TimerState, Treatment};
