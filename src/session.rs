//! Persisted session state.
//!
//! Each CLI invocation loads the session, applies one transition through
//! [`crate::app::App`], and saves it again. The file replaces the browser's
//! local storage and carries:
//!
//! - the current photo collection and the selected photo
//! - the discovery history
//! - the ban list and the filter criteria
//! - throttle state (cooldown resume time, hourly budget)
//!
//! ## Storage
//!
//! A pretty-printed JSON file at `<state_dir>/session.json`. A missing,
//! unreadable, or version-mismatched file loads as an empty session; the
//! next save overwrites it.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ban::BanList;
use crate::filter::FilterCriteria;
use crate::throttle::Throttle;
use crate::types::Photo;

/// Name of the session file within the state directory.
const SESSION_FILENAME: &str = "session.json";

/// Version of the session format. Bump this to discard existing sessions
/// when the format changes.
const SESSION_VERSION: u32 = 1;

/// Oldest discoveries are dropped beyond this many entries.
pub const HISTORY_LIMIT: usize = 100;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub history: Vec<Photo>,
    #[serde(default)]
    pub selected: Option<Photo>,
    #[serde(default)]
    pub bans: BanList,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub throttle: Throttle,
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

impl Session {
    pub fn empty() -> Self {
        Self {
            version: SESSION_VERSION,
            photos: Vec::new(),
            history: Vec::new(),
            selected: None,
            bans: BanList::new(),
            criteria: FilterCriteria::default(),
            throttle: Throttle::default(),
        }
    }

    /// Load from the state directory, falling back to an empty session.
    pub fn load(state_dir: &Path) -> Self {
        let path = session_path(state_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let session: Self = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("ignoring unreadable session {}: {e}", path.display());
                return Self::empty();
            }
        };
        if session.version != SESSION_VERSION {
            log::warn!(
                "ignoring session {} with version {}",
                path.display(),
                session.version
            );
            return Self::empty();
        }
        session
    }

    /// Save to the state directory, creating it if needed.
    pub fn save(&self, state_dir: &Path) -> Result<(), SessionError> {
        std::fs::create_dir_all(state_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(session_path(state_dir), json)?;
        Ok(())
    }

    /// Append to the history, dropping the oldest entries past the limit.
    pub fn push_history(&mut self, photo: Photo) {
        self.history.push(photo);
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }
}

/// Resolve the session file path for a state directory.
pub fn session_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SESSION_FILENAME)
}
