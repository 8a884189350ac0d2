//! Error types for the session layer.

use thiserror::Error;

/// Errors that can occur in the session layer.
///
/// Most failures here are recovered rather than surfaced: snapshot
/// problems fall back to defaults, catalog sync failures degrade to an
/// empty catalog, and per-asset fetch failures are isolated and logged.
#[derive(Debug, Error)]
pub enum Error {
    /// Persistent store read/write failed.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] gacha_db::Error),

    /// Initial catalog load or sync failed.
    #[error("Catalog sync failed: {0}")]
    CatalogSync(String),

    /// A single asset could not be fetched or stored.
    #[error("Asset fetch failed for {url}: {reason}")]
    AssetFetch { url: String, reason: String },

    /// The destructive reset was not confirmed.
    #[error("Reset was not confirmed")]
    ResetDeclined,

    /// Snapshot or data directory IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
