//! Gacha DB - Embedded persistent store using native_db
//!
//! Provides durable local storage for:
//! - Catalog card and scout records, synced from code at startup
//! - Cached binary image assets, keyed by logical URL
//!
//! Plus the pure reconciliation helper the sync engine uses to find
//! stale records.

mod error;
mod models;
mod reconcile;
mod store;

pub use error::{Error, Result};
pub use models::{StoredAsset, StoredCard, StoredScout};
pub use reconcile::stale_keys;
pub use store::Store;
