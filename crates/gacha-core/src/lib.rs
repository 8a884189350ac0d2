//! Gacha Core - Catalog data, player state, and draw resolution
//!
//! This crate provides the client-side game core for the card
//! collection app:
//! - Catalog entities (`Card`, `Scout`) and the compiled-in catalog
//! - Rarity tiers and the draw rate table
//! - The persisted `PlayerState` aggregate
//! - `GameCore`, the single authority for state mutation (draws,
//!   gift codes, daily bonus, profile)
//! - Derived views: formatted inventory and collection rank
//!
//! All operations are synchronous and deterministic given a seed;
//! persistence and asset syncing live in `gacha-db` / `gacha-session`.

pub mod bonus;
mod catalog;
pub mod data;
mod error;
mod game;
mod rarity;
mod rng;
mod state;
pub mod views;

pub use catalog::{Card, Catalog, Scout};
pub use error::{Error, Result};
pub use game::{GameCore, RedeemError, RedeemReceipt};
pub use rarity::{Rarity, RarityRates};
pub use rng::GameRng;
pub use state::PlayerState;
pub use views::{InventoryEntry, Rank, RankInfo};
