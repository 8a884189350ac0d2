//! Storage models for catalog records and cached assets
//!
//! The store holds three independent tables: `cards`, `scouts`, and
//! `assets`. Cards index on name and rarity, scouts on activity
//! (stored as a `u8` column), assets key on their logical URL.

use gacha_core::{Card, Rarity, Scout};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored card record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredCard {
    /// Primary key - card id.
    #[primary_key]
    pub id: String,
    /// Display name.
    #[secondary_key]
    pub name: String,
    /// Rarity tier (1..=5).
    #[secondary_key]
    pub rarity: u8,
    /// Logical image path.
    pub image_url: String,
    /// Flavor text.
    pub description: String,
}

impl StoredCard {
    /// Create from a catalog card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            rarity: card.rarity.as_u8(),
            image_url: card.image_url.clone(),
            description: card.description.clone(),
        }
    }

    /// Convert to a catalog card.
    pub fn to_card(&self) -> Card {
        Card {
            id: self.id.clone(),
            name: self.name.clone(),
            rarity: Rarity::try_from(self.rarity).unwrap_or_default(),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
        }
    }
}

/// Stored scout record.
///
/// The card list is carried as a serialized payload; scouts own copies
/// of their cards rather than joining against the cards table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredScout {
    /// Primary key - scout id.
    #[primary_key]
    pub id: String,
    /// Visibility flag (0 or 1).
    #[secondary_key]
    pub active: u8,
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Fine-print note.
    pub note: String,
    /// Banner image path.
    pub banner_image: String,
    /// Home-screen banner image path.
    pub banner_image_home: String,
    /// Serialized card list.
    pub cards: Vec<u8>,
    /// Display cost per draw.
    pub cost: i64,
    /// Primary theme color.
    pub main_color: String,
    /// Secondary theme color.
    pub sub_color: String,
}

impl StoredScout {
    /// Create from a catalog scout.
    pub fn from_scout(scout: &Scout) -> Self {
        let cards = bincode::serialize(&scout.cards).unwrap_or_default();
        Self {
            id: scout.id.clone(),
            active: scout.is_active.into(),
            title: scout.title.clone(),
            description: scout.description.clone(),
            note: scout.note.clone(),
            banner_image: scout.banner_image.clone(),
            banner_image_home: scout.banner_image_home.clone(),
            cards,
            cost: scout.cost,
            main_color: scout.main_color.clone(),
            sub_color: scout.sub_color.clone(),
        }
    }

    /// Convert to a catalog scout.
    pub fn to_scout(&self) -> Scout {
        let cards: Vec<Card> = bincode::deserialize(&self.cards).unwrap_or_default();
        Scout {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            note: self.note.clone(),
            banner_image: self.banner_image.clone(),
            banner_image_home: self.banner_image_home.clone(),
            cards,
            cost: self.cost,
            is_active: self.active != 0,
            main_color: self.main_color.clone(),
            sub_color: self.sub_color.clone(),
        }
    }
}

/// Cached binary asset, keyed by its logical URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredAsset {
    /// Primary key - the logical URL/path the asset was fetched for.
    #[primary_key]
    pub url: String,
    /// Content type reported by the fetch.
    pub mime_type: String,
    /// Raw payload.
    pub bytes: Vec<u8>,
}
