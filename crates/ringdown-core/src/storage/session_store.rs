//! JSON snapshot of the countdown session between CLI invocations.
//!
//! The engine itself has no persistence; this store is the driver-level
//! analogue of the page staying open. A missing or corrupt file simply
//! means a fresh session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::Result;
use crate::timer::CountdownEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub engine: CountdownEngine,
    /// Wall-clock moment up to which ticks have been delivered.
    /// `Some` iff the stored engine is running.
    pub last_tick_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location, `data_dir()/session.json`.
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: data_dir()?.join("session.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the stored session. Absent or unreadable snapshots yield
    /// `None` -- the caller starts a fresh session.
    pub fn load(&self) -> Option<StoredSession> {
        let json = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
