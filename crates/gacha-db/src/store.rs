//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use gacha_core::{Card, Rarity, Scout};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredCard>().unwrap();
    models.define::<StoredScout>().unwrap();
    models.define::<StoredAsset>().unwrap();
    models
});

/// Persistent store for catalog records and cached assets.
///
/// Three independent tables addressed by logical key equality. Upserts
/// are idempotent: applying the same catalog twice leaves the same
/// final state. No cross-table atomicity is promised.
pub struct Store {
    db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Bulk upsert cards by id in one transaction.
    pub fn put_cards(&self, cards: &[Card]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        for card in cards {
            rw.upsert(StoredCard::from_card(card))?;
        }
        rw.commit()?;
        Ok(cards.len())
    }

    /// Bulk upsert scouts by id in one transaction.
    pub fn put_scouts(&self, scouts: &[Scout]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        for scout in scouts {
            rw.upsert(StoredScout::from_scout(scout))?;
        }
        rw.commit()?;
        Ok(scouts.len())
    }

    /// Store a fetched asset, keyed by its logical URL.
    pub fn put_asset(&self, asset: StoredAsset) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(asset)?;
        rw.commit()?;
        Ok(())
    }

    /// Load a card by id.
    pub fn card(&self, id: &str) -> Result<Option<Card>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredCard> = r.get().primary(id.to_string())?;
        Ok(stored.map(|s| s.to_card()))
    }

    /// Load a scout by id.
    pub fn scout(&self, id: &str) -> Result<Option<Scout>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredScout> = r.get().primary(id.to_string())?;
        Ok(stored.map(|s| s.to_scout()))
    }

    /// Load a cached asset by its logical URL.
    pub fn asset(&self, url: &str) -> Result<Option<StoredAsset>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredAsset> = r.get().primary(url.to_string())?;
        Ok(stored)
    }

    /// Enumerate all stored card ids.
    pub fn card_ids(&self) -> Result<Vec<String>> {
        Ok(self.all_stored_cards()?.into_iter().map(|c| c.id).collect())
    }

    /// Enumerate all stored scout ids.
    pub fn scout_ids(&self) -> Result<Vec<String>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredScout>()?;
        let iter = scan.all()?;
        let scouts: std::result::Result<Vec<StoredScout>, _> = iter.collect();
        let scouts = scouts.map_err(|e| Error::Database(e.to_string()))?;
        Ok(scouts.into_iter().map(|s| s.id).collect())
    }

    /// Enumerate the logical URLs of all cached assets.
    pub fn asset_urls(&self) -> Result<Vec<String>> {
        Ok(self.all_assets()?.into_iter().map(|a| a.url).collect())
    }

    /// Bulk delete cards by id.
    pub fn delete_cards(&self, ids: &[String]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let mut deleted = 0;
        for id in ids {
            if let Some(card) = rw.get().primary::<StoredCard>(id.clone())? {
                rw.remove(card)?;
                deleted += 1;
            }
        }
        rw.commit()?;
        Ok(deleted)
    }

    /// Bulk delete scouts by id.
    pub fn delete_scouts(&self, ids: &[String]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let mut deleted = 0;
        for id in ids {
            if let Some(scout) = rw.get().primary::<StoredScout>(id.clone())? {
                rw.remove(scout)?;
                deleted += 1;
            }
        }
        rw.commit()?;
        Ok(deleted)
    }

    /// Load all cards.
    pub fn all_cards(&self) -> Result<Vec<Card>> {
        Ok(self
            .all_stored_cards()?
            .into_iter()
            .map(|c| c.to_card())
            .collect())
    }

    /// Load all scouts.
    pub fn all_scouts(&self) -> Result<Vec<Scout>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredScout>()?;
        let iter = scan.all()?;
        let scouts: std::result::Result<Vec<StoredScout>, _> = iter.collect();
        let scouts = scouts.map_err(|e| Error::Database(e.to_string()))?;
        Ok(scouts.into_iter().map(|s| s.to_scout()).collect())
    }

    /// Load all cached assets.
    pub fn all_assets(&self) -> Result<Vec<StoredAsset>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredAsset>()?;
        let iter = scan.all()?;
        let assets: std::result::Result<Vec<StoredAsset>, _> = iter.collect();
        assets.map_err(|e| Error::Database(e.to_string()))
    }

    /// Load all cards of a specific rarity tier.
    pub fn cards_by_rarity(&self, rarity: Rarity) -> Result<Vec<Card>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredCard>(StoredCardKey::rarity)?;
        let iter = scan.start_with(rarity.as_u8())?;
        let cards: std::result::Result<Vec<StoredCard>, _> = iter.collect();
        let cards = cards.map_err(|e| Error::Database(e.to_string()))?;
        Ok(cards.into_iter().map(|c| c.to_card()).collect())
    }

    /// Load all currently visible scouts.
    pub fn active_scouts(&self) -> Result<Vec<Scout>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredScout>(StoredScoutKey::active)?;
        let iter = scan.start_with(1u8)?;
        let scouts: std::result::Result<Vec<StoredScout>, _> = iter.collect();
        let scouts = scouts.map_err(|e| Error::Database(e.to_string()))?;
        Ok(scouts.into_iter().map(|s| s.to_scout()).collect())
    }

    /// Clear all data from all three tables (used only by reset).
    pub fn clear(&self) -> Result<()> {
        let card_ids = self.card_ids()?;
        let scout_ids = self.scout_ids()?;
        let asset_urls = self.asset_urls()?;

        let rw = self.db.rw_transaction()?;

        for id in card_ids {
            if let Some(card) = rw.get().primary::<StoredCard>(id)? {
                rw.remove(card)?;
            }
        }
        for id in scout_ids {
            if let Some(scout) = rw.get().primary::<StoredScout>(id)? {
                rw.remove(scout)?;
            }
        }
        for url in asset_urls {
            if let Some(asset) = rw.get().primary::<StoredAsset>(url)? {
                rw.remove(asset)?;
            }
        }

        rw.commit()?;
        Ok(())
    }

    fn all_stored_cards(&self) -> Result<Vec<StoredCard>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredCard>()?;
        let iter = scan.all()?;
        let cards: std::result::Result<Vec<StoredCard>, _> = iter.collect();
        cards.map_err(|e| Error::Database(e.to_string()))
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
