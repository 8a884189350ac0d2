//! Game state core
//!
//! `GameCore` is the single authority over the player state: every
//! mutation goes through a named operation that builds the next state
//! and swaps it in whole, so observers never see a partial update.

use crate::bonus;
use crate::catalog::{Card, Catalog};
use crate::data::{self, DAILY_BONUS_CREDITS, GACHA_COST, RARITY_RATES};
use crate::rarity::RarityRates;
use crate::rng::GameRng;
use crate::state::PlayerState;
use crate::views::{self, InventoryEntry, RankInfo};
use chrono::{DateTime, Local, Utc};
use indexmap::IndexMap;
use thiserror::Error;

/// Reasons a gift code redemption can fail
///
/// Non-fatal and user-facing; the `Display` text is shown directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RedeemError {
    #[error("This gift code has already been used.")]
    AlreadyRedeemed,

    #[error("Invalid gift code.")]
    InvalidCode,
}

/// A successful gift code redemption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemReceipt {
    /// Credits granted
    pub amount: i64,
    /// Human-readable confirmation
    pub message: String,
}

/// Owner of the mutable player state and all state-changing operations
#[derive(Debug, Clone)]
pub struct GameCore {
    catalog: Catalog,
    rates: RarityRates,
    gift_codes: IndexMap<String, i64>,
    state: PlayerState,
    rng: GameRng,
}

impl GameCore {
    /// Create a core with default player state and built-in tables
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self::with_state(catalog, PlayerState::default(), seed)
    }

    /// Create a core resuming from a loaded player state
    pub fn with_state(catalog: Catalog, state: PlayerState, seed: u64) -> Self {
        Self {
            catalog,
            rates: RARITY_RATES,
            gift_codes: data::gift_codes(),
            state,
            rng: GameRng::new(seed),
        }
    }

    /// The current player state snapshot
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The catalog this core draws from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Swap in a freshly synced catalog
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Draw `count` cards, optionally restricted to one scout's pool
    ///
    /// Deducts `GACHA_COST * count` up front; with insufficient credits
    /// the whole batch is a no-op and the result is empty. Each draw
    /// resolves a rarity tier from the rate table, then picks uniformly
    /// within that tier of the pool, falling back to the whole pool when
    /// the tier is empty. Won ids are appended to the inventory in draw
    /// order. An unknown `scout_id` falls back to the full catalog.
    ///
    /// The batch cost stays committed even when a draw resolves against
    /// an empty pool and yields nothing.
    pub fn pull_gacha(&mut self, count: u32, scout_id: Option<&str>) -> Vec<Card> {
        let total_cost = GACHA_COST * i64::from(count);
        if self.state.credits < total_cost {
            return Vec::new();
        }

        let pool: &[Card] = match scout_id.and_then(|id| self.catalog.scout(id)) {
            Some(scout) => &scout.cards,
            None => self.catalog.cards(),
        };

        let mut won = Vec::new();
        let mut won_ids = Vec::new();
        for _ in 0..count {
            let rarity = self.rates.pick(self.rng.next_f64());

            let tier: Vec<&Card> = pool.iter().filter(|c| c.rarity == rarity).collect();
            let candidates: Vec<&Card> = if tier.is_empty() {
                pool.iter().collect()
            } else {
                tier
            };

            if let Some(i) = self.rng.index(candidates.len()) {
                let card = candidates[i].clone();
                won_ids.push(card.id.clone());
                won.push(card);
            }
        }

        let mut next = self.state.clone();
        next.credits -= total_cost;
        next.inventory.extend(won_ids);
        self.state = next;

        won
    }

    /// Add credits unconditionally (amount may be negative)
    pub fn add_credits(&mut self, amount: i64) {
        let mut next = self.state.clone();
        next.credits += amount;
        self.state = next;
    }

    /// Redeem a gift code
    ///
    /// Codes compare case-insensitively with surrounding whitespace
    /// trimmed; the normalized form is what gets recorded, so casing
    /// variants of one code count as a single redemption.
    pub fn redeem_code(&mut self, code: &str) -> Result<RedeemReceipt, RedeemError> {
        let normalized = code.trim().to_uppercase();

        if self.state.used_codes.contains(&normalized) {
            return Err(RedeemError::AlreadyRedeemed);
        }

        let amount = *self
            .gift_codes
            .get(&normalized)
            .ok_or(RedeemError::InvalidCode)?;

        let mut next = self.state.clone();
        next.credits += amount;
        next.used_codes.insert(normalized);
        self.state = next;

        Ok(RedeemReceipt {
            amount,
            message: format!("Received {amount} credits!"),
        })
    }

    /// Grant the daily bonus if the current slot is unclaimed
    ///
    /// Returns the granted amount, or `None` when this slot was already
    /// claimed. Safe to call from a recurring timer: at most one grant
    /// per 12-hour slot.
    pub fn check_daily_bonus(&mut self, now: DateTime<Local>) -> Option<i64> {
        if !bonus::bonus_available(self.state.last_daily_bonus, now) {
            return None;
        }

        let mut next = self.state.clone();
        next.credits += DAILY_BONUS_CREDITS;
        next.last_daily_bonus = Some(now.with_timezone(&Utc));
        self.state = next;

        Some(DAILY_BONUS_CREDITS)
    }

    /// When the next daily bonus can be claimed
    pub fn next_bonus_at(&self, now: DateTime<Local>) -> DateTime<Local> {
        bonus::next_bonus_at(self.state.last_daily_bonus, now)
    }

    /// Replace the display name
    pub fn update_profile(&mut self, name: &str) {
        let mut next = self.state.clone();
        next.user_name = name.to_string();
        self.state = next;
    }

    /// Replace the showcased profile card (existence is not validated)
    pub fn update_profile_card(&mut self, card_id: &str) {
        let mut next = self.state.clone();
        next.profile_card_id = Some(card_id.to_string());
        self.state = next;
    }

    /// Wipe the player state back to defaults
    pub fn reset(&mut self) {
        self.state = PlayerState::default();
    }

    /// Owned cards grouped by id with duplicate counts
    pub fn formatted_inventory(&self) -> Vec<InventoryEntry> {
        views::formatted_inventory(&self.state.inventory, &self.catalog)
    }

    /// Collection rank derived from owned card rarities
    pub fn rank_info(&self) -> RankInfo {
        views::rank_info(&self.state.inventory, &self.catalog)
    }
}
