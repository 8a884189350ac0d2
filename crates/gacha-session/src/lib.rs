//! Gacha Session - Persistence and coordination for the game core
//!
//! This crate ties the pieces together:
//! - `SnapshotSlot` - the persisted JSON player-state slot
//! - `SyncEngine` - store reconciliation and asset caching
//! - `Session` - the facade the presentation layer consumes
//! - `spawn_bonus_checker` - the recurring daily-bonus trigger

mod bonus_timer;
mod error;
mod session;
mod snapshot;
mod sync;

pub use bonus_timer::{spawn_bonus_checker, BonusChecker, BONUS_CHECK_INTERVAL};
pub use error::{Error, Result};
pub use session::{AssetHandle, Session, SessionConfig};
pub use snapshot::SnapshotSlot;
pub use sync::{SyncEngine, SyncReport, FETCH_BATCH_SIZE};
