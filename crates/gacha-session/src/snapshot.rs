//! The persisted player-state snapshot slot
//!
//! One JSON file holding the whole `PlayerState` aggregate. Loading
//! never fails: a missing file yields defaults, and a malformed file is
//! logged and replaced by defaults rather than failing the app. Saving
//! is best-effort; the in-memory state stays authoritative when a write
//! fails.

use gacha_core::PlayerState;
use std::fs;
use std::path::{Path, PathBuf};

/// A single JSON snapshot slot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotSlot {
    path: PathBuf,
}

impl SnapshotSlot {
    /// Create a slot backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot is currently persisted.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, falling back to defaults.
    ///
    /// Missing fields default individually; an unreadable or
    /// unparseable file yields a full default state.
    pub fn load(&self) -> PlayerState {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return PlayerState::default();
            }
            Err(e) => {
                log::warn!("Failed to read snapshot {}: {e}", self.path.display());
                return PlayerState::default();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!(
                    "Malformed snapshot {}: {e}; starting from defaults",
                    self.path.display()
                );
                PlayerState::default()
            }
        }
    }

    /// Persist the state, best-effort.
    pub fn save(&self, state: &PlayerState) {
        let json = match serde_json::to_vec(state) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            log::error!("Failed to write snapshot {}: {e}", self.path.display());
        }
    }

    /// Remove the persisted snapshot (used only by reset).
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::error!("Failed to remove snapshot {}: {e}", self.path.display()),
        }
    }
}
