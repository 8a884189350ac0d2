//! Asset sync engine
//!
//! Reconciles the persistent store against the compiled-in catalog at
//! startup: upserts current cards and scouts, deletes stale records
//! using the freshly upserted id set as the keep set, then fetches and
//! caches any image assets not already present. Asset caching is an
//! idempotent fill: cached blobs are never re-fetched, and blobs for
//! removed content are only reclaimed by a full reset.

use crate::error::{Error, Result};
use gacha_core::Catalog;
use gacha_db::{stale_keys, Store, StoredAsset};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Concurrent asset fetches per batch.
pub const FETCH_BATCH_SIZE: usize = 5;

/// Counts of what a sync pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Cards upserted from the catalog.
    pub cards_upserted: usize,
    /// Scouts upserted from the catalog.
    pub scouts_upserted: usize,
    /// Stale card records deleted.
    pub cards_deleted: usize,
    /// Stale scout records deleted.
    pub scouts_deleted: usize,
    /// Assets fetched and cached this pass.
    pub assets_fetched: usize,
    /// Assets that failed to fetch or store (retried next pass).
    pub assets_failed: usize,
    /// Assets already cached and skipped.
    pub assets_cached: usize,
}

/// Reconciles store contents and cached assets against the catalog.
pub struct SyncEngine {
    store: Arc<Store>,
    client: Client,
    asset_base_url: String,
}

impl SyncEngine {
    /// Create an engine fetching assets relative to `asset_base_url`.
    pub fn new(store: Arc<Store>, asset_base_url: impl Into<String>) -> Self {
        Self {
            store,
            client: Client::new(),
            asset_base_url: asset_base_url.into(),
        }
    }

    /// Run a full sync pass: seed catalog records, then cache assets.
    ///
    /// Re-entrant safe; running twice with an unchanged catalog leaves
    /// the store unchanged and fetches nothing.
    pub async fn sync(&self, catalog: &Catalog) -> Result<SyncReport> {
        let mut report = self.seed_catalog(catalog)?;
        self.sync_assets(catalog, &mut report).await?;
        log::info!(
            "Sync complete: {}+{} records, {} stale removed, {} assets fetched ({} failed, {} cached)",
            report.cards_upserted,
            report.scouts_upserted,
            report.cards_deleted + report.scouts_deleted,
            report.assets_fetched,
            report.assets_failed,
            report.assets_cached,
        );
        Ok(report)
    }

    /// Upsert current catalog records and delete stale ones.
    pub fn seed_catalog(&self, catalog: &Catalog) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        report.cards_upserted = self.store.put_cards(catalog.cards())?;
        report.scouts_upserted = self.store.put_scouts(catalog.scouts())?;

        let desired_cards = catalog.cards().iter().map(|c| c.id.as_str());
        let stale_cards = stale_keys(desired_cards, self.store.card_ids()?);
        if !stale_cards.is_empty() {
            report.cards_deleted = self.store.delete_cards(&stale_cards)?;
        }

        let desired_scouts = catalog.scouts().iter().map(|s| s.id.as_str());
        let stale_scouts = stale_keys(desired_scouts, self.store.scout_ids()?);
        if !stale_scouts.is_empty() {
            report.scouts_deleted = self.store.delete_scouts(&stale_scouts)?;
        }

        Ok(report)
    }

    /// Fetch and cache every referenced image not already present.
    ///
    /// Fetches run in batches of [`FETCH_BATCH_SIZE`]; one URL failing
    /// never aborts the others. Failures are logged and counted, not
    /// retried until the next full sync pass.
    pub async fn sync_assets(&self, catalog: &Catalog, report: &mut SyncReport) -> Result<()> {
        let cached: HashSet<String> = self.store.asset_urls()?.into_iter().collect();

        let mut to_fetch = Vec::new();
        for path in catalog.image_urls() {
            if cached.contains(&path) {
                report.assets_cached += 1;
            } else {
                to_fetch.push(path);
            }
        }

        for batch in to_fetch.chunks(FETCH_BATCH_SIZE) {
            let mut tasks = JoinSet::new();
            for path in batch {
                let client = self.client.clone();
                let url = self.remote_url(path);
                let path = path.clone();
                tasks.spawn(async move {
                    let result = fetch_asset(&client, &path, &url).await;
                    (path, result)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((path, Ok(asset))) => match self.store.put_asset(asset) {
                        Ok(()) => report.assets_fetched += 1,
                        Err(e) => {
                            log::error!("Failed to store asset {path}: {e}");
                            report.assets_failed += 1;
                        }
                    },
                    Ok((path, Err(e))) => {
                        log::error!("Failed to cache asset {path}: {e}");
                        report.assets_failed += 1;
                    }
                    Err(e) => {
                        log::error!("Asset fetch task panicked: {e}");
                        report.assets_failed += 1;
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve a logical asset path to the URL it is fetched from.
    fn remote_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.asset_base_url.trim_end_matches('/'), path)
        }
    }
}

async fn fetch_asset(client: &Client, path: &str, url: &str) -> Result<StoredAsset> {
    let fetch_err = |reason: String| Error::AssetFetch {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_err(format!("status {}", response.status())));
    }

    let mime_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| fetch_err(e.to_string()))?
        .to_vec();

    Ok(StoredAsset {
        url: path.to_string(),
        mime_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{Card, Rarity, Scout};

    fn card(id: &str, image: &str) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            rarity: Rarity::One,
            image_url: image.to_string(),
            description: String::new(),
        }
    }

    fn scout(id: &str, cards: Vec<Card>) -> Scout {
        Scout {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            note: String::new(),
            banner_image: String::new(),
            banner_image_home: String::new(),
            cards,
            cost: 10,
            is_active: true,
            main_color: String::new(),
            sub_color: String::new(),
        }
    }

    fn engine() -> SyncEngine {
        // Unroutable base so any accidental fetch fails fast
        SyncEngine::new(Arc::new(Store::in_memory().unwrap()), "http://127.0.0.1:1")
    }

    #[test]
    fn test_seed_catalog_is_idempotent() {
        let engine = engine();
        let catalog = Catalog::new(
            vec![card("c1", ""), card("c2", "")],
            vec![scout("s1", vec![card("c1", "")])],
        );

        engine.seed_catalog(&catalog).unwrap();
        let first_cards = engine.store.card_ids().unwrap();
        let first_scouts = engine.store.scout_ids().unwrap();

        let report = engine.seed_catalog(&catalog).unwrap();
        assert_eq!(engine.store.card_ids().unwrap(), first_cards);
        assert_eq!(engine.store.scout_ids().unwrap(), first_scouts);
        assert_eq!(report.cards_deleted, 0);
        assert_eq!(report.scouts_deleted, 0);
    }

    #[test]
    fn test_removed_card_is_deleted_but_asset_kept() {
        let engine = engine();
        let full = Catalog::new(vec![card("c1", ""), card("c2", "")], vec![]);
        engine.seed_catalog(&full).unwrap();

        // A previously cached blob for the soon-to-be-removed card
        engine
            .store
            .put_asset(StoredAsset {
                url: "/cards/c2.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![1, 2, 3],
            })
            .unwrap();

        let trimmed = Catalog::new(vec![card("c1", "")], vec![]);
        let report = engine.seed_catalog(&trimmed).unwrap();

        assert_eq!(report.cards_deleted, 1);
        assert_eq!(engine.store.card_ids().unwrap(), vec!["c1"]);
        assert!(engine.store.asset("/cards/c2.jpg").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cached_assets_are_not_refetched() {
        let engine = engine();
        engine
            .store
            .put_asset(StoredAsset {
                url: "/cards/c1.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![1],
            })
            .unwrap();

        let catalog = Catalog::new(vec![card("c1", "/cards/c1.jpg")], vec![]);
        let report = engine.sync(&catalog).await.unwrap();

        assert_eq!(report.assets_cached, 1);
        assert_eq!(report.assets_fetched, 0);
        assert_eq!(report.assets_failed, 0);
    }

    #[tokio::test]
    async fn test_fetch_failures_are_isolated() {
        let engine = engine();
        let catalog = Catalog::new(
            vec![card("c1", "/cards/c1.jpg"), card("c2", "/cards/c2.jpg")],
            vec![],
        );

        // Both fetches fail against the unroutable base URL, but the
        // pass itself still completes.
        let report = engine.sync(&catalog).await.unwrap();
        assert_eq!(report.assets_failed, 2);
        assert_eq!(report.assets_fetched, 0);
        assert_eq!(report.cards_upserted, 2);
    }

    #[test]
    fn test_remote_url_joins_base_and_path() {
        let engine = SyncEngine::new(
            Arc::new(Store::in_memory().unwrap()),
            "https://cards.example/",
        );
        assert_eq!(
            engine.remote_url("/cards/c1.jpg?v=2"),
            "https://cards.example/cards/c1.jpg?v=2"
        );
        assert_eq!(
            engine.remote_url("https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
    }
}
