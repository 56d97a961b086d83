//! JSON-file persistence for tracker state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::warn;

use crate::tracker::TrackerState;

const STATE_FILE: &str = "skilltrack.json";

#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Storage under the per-user data directory, falling back to the
    /// working directory when none can be resolved.
    pub fn open_default() -> Self {
        let path = ProjectDirs::from("com", "skilltrack", "skilltrack")
            .map(|dirs| dirs.data_dir().join(STATE_FILE))
            .unwrap_or_else(|| PathBuf::from(STATE_FILE));
        Self { path }
    }

    /// Storage rooted at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last-saved state, or the empty default when the file is missing,
    /// unreadable, or malformed. Failures are logged, never surfaced.
    pub fn load(&self) -> TrackerState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return TrackerState::default(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "storage read failed");
                return TrackerState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "storage decode failed");
                TrackerState::default()
            }
        }
    }

    /// Persists the whole state document. Failures are logged, not surfaced.
    pub fn save(&self, state: &TrackerState) {
        if let Err(err) = self.try_save(state) {
            warn!(path = %self.path.display(), %err, "storage write failed");
        }
    }

    fn try_save(&self, state: &TrackerState) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string(state).map_err(io::Error::from)?;
        fs::write(&self.path, raw)
    }

    /// Erases persisted state and returns the canonical empty defaults.
    pub fn clear(&self) -> TrackerState {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "storage clear failed");
            }
        }
        TrackerState::default()
    }
}
