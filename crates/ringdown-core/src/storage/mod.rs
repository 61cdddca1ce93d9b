mod config;
mod session_store;

pub use config::{AlarmConfig, Config, DialConfig, SessionConfig, UiConfig};
pub use session_store::{SessionStore, StoredSession};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/ringdown[-dev]/` based on RINGDOWN_ENV.
///
/// Set RINGDOWN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RINGDOWN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ringdown-dev")
    } else {
        base_dir.join("ringdown")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
