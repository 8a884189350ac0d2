//! Session facade
//!
//! `Session` wires the game core, the persistent store, the snapshot
//! slot, and the sync engine into the narrow interface the screens
//! consume: the state snapshot, catalog lists, the mutating operations,
//! the derived views, asset resolution, and the readiness flag.
//!
//! Catalog or store failures degrade gracefully: the session keeps
//! running with an empty catalog and `data_loaded() == false`, and
//! snapshot write failures leave the in-memory state authoritative.

use crate::error::{Error, Result};
use crate::snapshot::SnapshotSlot;
use crate::sync::SyncEngine;
use chrono::{DateTime, Local};
use gacha_core::{
    data, Card, Catalog, GameCore, InventoryEntry, PlayerState, RankInfo, RedeemError,
    RedeemReceipt, Scout,
};
use gacha_db::{Store, StoredAsset};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Where session data lives and where assets are fetched from.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the database file and the snapshot slot.
    pub data_dir: PathBuf,
    /// Base URL that logical asset paths are fetched relative to.
    pub asset_base_url: String,
    /// Fixed RNG seed; defaults to the wall clock when absent.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create a config with a clock-derived seed.
    pub fn new(data_dir: impl Into<PathBuf>, asset_base_url: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            asset_base_url: asset_base_url.into(),
            seed: None,
        }
    }
}

/// A resolved asset reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetHandle<'a> {
    /// The asset is cached locally.
    Cached(&'a StoredAsset),
    /// No cached copy; use the original path as-is.
    Remote(&'a str),
}

/// The coordinating service owning game state and persistence.
pub struct Session {
    core: GameCore,
    store: Option<Arc<Store>>,
    snapshot: SnapshotSlot,
    assets: HashMap<String, StoredAsset>,
    source_catalog: Catalog,
    asset_base_url: String,
    data_loaded: bool,
}

impl Session {
    /// Start a session against the built-in catalog.
    pub async fn start(config: SessionConfig) -> Result<Self> {
        Self::start_with_catalog(config, data::builtin_catalog()).await
    }

    /// Start a session against an explicit catalog.
    ///
    /// Loads the snapshot (defaults on absence or corruption), opens
    /// the store, runs a sync pass, and loads the synced catalog and
    /// cached assets back out of the store. Store or sync failures are
    /// logged and leave the session running with an empty catalog.
    pub async fn start_with_catalog(config: SessionConfig, catalog: Catalog) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let snapshot = SnapshotSlot::new(config.data_dir.join("state.json"));
        let state = snapshot.load();
        let seed = config.seed.unwrap_or_else(seed_from_clock);

        let store = match Store::open(config.data_dir.join("gacha.db")) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                log::error!("Failed to open store: {e}; continuing with empty catalog");
                None
            }
        };

        let mut session = Self {
            core: GameCore::with_state(Catalog::empty(), state, seed),
            store,
            snapshot,
            assets: HashMap::new(),
            source_catalog: catalog,
            asset_base_url: config.asset_base_url,
            data_loaded: false,
        };
        session.reload().await;
        Ok(session)
    }

    /// Sync the store against the source catalog and load it back.
    async fn reload(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };

        let engine = SyncEngine::new(store, self.asset_base_url.clone());
        if let Err(e) = engine.sync(&self.source_catalog).await {
            log::error!("Catalog sync failed: {e}; continuing with empty catalog");
            return;
        }

        match self.load_from_store() {
            Ok(()) => self.data_loaded = true,
            Err(e) => log::error!("Failed to load catalog from store: {e}"),
        }
    }

    fn load_from_store(&mut self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let cards = store
            .all_cards()
            .map_err(|e| Error::CatalogSync(e.to_string()))?;
        let scouts = store
            .all_scouts()
            .map_err(|e| Error::CatalogSync(e.to_string()))?;
        self.core.set_catalog(Catalog::new(cards, scouts));
        self.assets = store
            .all_assets()?
            .into_iter()
            .map(|a| (a.url.clone(), a))
            .collect();
        Ok(())
    }

    /// Whether the catalog was loaded successfully.
    pub fn data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// The current player state snapshot.
    pub fn state(&self) -> &PlayerState {
        self.core.state()
    }

    /// All catalog cards.
    pub fn cards(&self) -> &[Card] {
        self.core.catalog().cards()
    }

    /// All scout pools.
    pub fn scouts(&self) -> &[Scout] {
        self.core.catalog().scouts()
    }

    /// The scout whose pool contains the given card.
    pub fn scout_for_card(&self, card_id: &str) -> Option<&Scout> {
        self.core.catalog().scout_for_card(card_id)
    }

    /// Resolve a logical asset path to a cached blob, or hand the
    /// path back verbatim when nothing is cached for it.
    pub fn resolve_asset<'a>(&'a self, path: &'a str) -> AssetHandle<'a> {
        match self.assets.get(path) {
            Some(asset) => AssetHandle::Cached(asset),
            None => AssetHandle::Remote(path),
        }
    }

    /// Draw cards; see [`GameCore::pull_gacha`].
    pub fn pull_gacha(&mut self, count: u32, scout_id: Option<&str>) -> Vec<Card> {
        let won = self.core.pull_gacha(count, scout_id);
        self.persist();
        won
    }

    /// Add credits unconditionally.
    pub fn add_credits(&mut self, amount: i64) {
        self.core.add_credits(amount);
        self.persist();
    }

    /// Redeem a gift code.
    pub fn redeem_code(&mut self, code: &str) -> std::result::Result<RedeemReceipt, RedeemError> {
        let receipt = self.core.redeem_code(code)?;
        self.persist();
        Ok(receipt)
    }

    /// Grant the daily bonus if the current slot is unclaimed.
    pub fn check_daily_bonus(&mut self) -> Option<i64> {
        let granted = self.core.check_daily_bonus(Local::now());
        if granted.is_some() {
            self.persist();
        }
        granted
    }

    /// When the next daily bonus can be claimed.
    pub fn next_bonus_at(&self) -> DateTime<Local> {
        self.core.next_bonus_at(Local::now())
    }

    /// Replace the display name.
    pub fn update_profile(&mut self, name: &str) {
        self.core.update_profile(name);
        self.persist();
    }

    /// Replace the showcased profile card.
    pub fn update_profile_card(&mut self, card_id: &str) {
        self.core.update_profile_card(card_id);
        self.persist();
    }

    /// Owned cards grouped by id with duplicate counts.
    pub fn formatted_inventory(&self) -> Vec<InventoryEntry> {
        self.core.formatted_inventory()
    }

    /// Collection rank derived from owned card rarities.
    pub fn rank_info(&self) -> RankInfo {
        self.core.rank_info()
    }

    /// Wipe everything: snapshot slot, store contents, and in-memory
    /// state, then re-seed from the source catalog.
    ///
    /// Irreversible. Declining the confirmation aborts with no side
    /// effects.
    pub async fn reset_data(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(Error::ResetDeclined);
        }

        self.snapshot.clear();
        if let Some(store) = &self.store {
            store.clear()?;
        }
        self.core.reset();
        self.assets.clear();
        self.data_loaded = false;

        self.reload().await;
        Ok(())
    }

    /// Persist the current state snapshot, best-effort.
    fn persist(&self) {
        self.snapshot.save(self.core.state());
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9)
}
