//! Catalog entities: cards and scout pools
//!
//! The compiled-in catalog is the single source of truth for card and
//! scout content. Records are immutable; the persistent store is
//! reconciled against the catalog at startup ("code is authoritative").

use crate::rarity::Rarity;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A collectible card definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable key, globally unique across all pools
    pub id: String,
    /// Display name
    pub name: String,
    /// Rarity tier
    pub rarity: Rarity,
    /// Logical asset path for the card image
    pub image_url: String,
    /// Flavor text
    pub description: String,
}

/// A themed draw pool grouping a subset of cards
///
/// Scouts own copies of their cards rather than referencing them by id,
/// mirroring how they are defined and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scout {
    /// Stable key
    pub id: String,
    /// Display title
    pub title: String,
    /// Long description shown on the scout page
    pub description: String,
    /// Fine-print note
    pub note: String,
    /// Logical asset path for the scout banner
    pub banner_image: String,
    /// Logical asset path for the home-screen banner
    pub banner_image_home: String,
    /// Cards drawable from this pool
    pub cards: Vec<Card>,
    /// Display cost per draw
    pub cost: i64,
    /// Whether the scout is currently visible
    pub is_active: bool,
    /// Primary theme color
    pub main_color: String,
    /// Secondary theme color
    pub sub_color: String,
}

/// The full card and scout catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    cards: Vec<Card>,
    scouts: Vec<Scout>,
}

impl Catalog {
    /// Create a catalog from card and scout lists
    pub fn new(cards: Vec<Card>, scouts: Vec<Scout>) -> Self {
        Self { cards, scouts }
    }

    /// An empty catalog (used when the initial load fails)
    pub fn empty() -> Self {
        Self::default()
    }

    /// All cards across all pools
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// All scout pools
    pub fn scouts(&self) -> &[Scout] {
        &self.scouts
    }

    /// Look up a card by id
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Look up a scout by id
    pub fn scout(&self, id: &str) -> Option<&Scout> {
        self.scouts.iter().find(|s| s.id == id)
    }

    /// The scout whose pool contains the given card, if any
    pub fn scout_for_card(&self, card_id: &str) -> Option<&Scout> {
        self.scouts
            .iter()
            .find(|s| s.cards.iter().any(|c| c.id == card_id))
    }

    /// All image paths referenced by cards and scout banners, deduplicated
    /// in first-reference order
    pub fn image_urls(&self) -> IndexSet<String> {
        let mut urls = IndexSet::new();
        for card in &self.cards {
            if !card.image_url.is_empty() {
                urls.insert(card.image_url.clone());
            }
        }
        for scout in &self.scouts {
            if !scout.banner_image.is_empty() {
                urls.insert(scout.banner_image.clone());
            }
            if !scout.banner_image_home.is_empty() {
                urls.insert(scout.banner_image_home.clone());
            }
        }
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            banner_image: format!("/assets/{id}_banner.png"),
            banner_image_home: format!("/assets/{id}_banner_home.png"),
            cards,
            cost: 10,
            is_active: true,
            main_color: "#000000".to_string(),
            sub_color: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_lookups() {
        let c1 = card("c1", "/cards/c1.jpg");
        let c2 = card("c2", "/cards/c2.jpg");
        let catalog = Catalog::new(
            vec![c1.clone(), c2.clone()],
            vec![scout("s1", vec![c1]), scout("s2", vec![c2])],
        );

        assert_eq!(catalog.card("c2").unwrap().id, "c2");
        assert!(catalog.card("missing").is_none());
        assert_eq!(catalog.scout("s1").unwrap().id, "s1");
        assert_eq!(catalog.scout_for_card("c2").unwrap().id, "s2");
        assert!(catalog.scout_for_card("missing").is_none());
    }

    #[test]
    fn test_image_urls_deduplicated() {
        let shared = card("c1", "/cards/shared.jpg");
        let twin = card("c2", "/cards/shared.jpg");
        let catalog = Catalog::new(
            vec![shared.clone(), twin],
            vec![scout("s1", vec![shared])],
        );

        let urls = catalog.image_urls();
        assert_eq!(urls.len(), 3);
        assert!(urls.contains("/cards/shared.jpg"));
        assert!(urls.contains("/assets/s1_banner.png"));
        assert!(urls.contains("/assets/s1_banner_home.png"));
    }

    #[test]
    fn test_empty_images_skipped() {
        let catalog = Catalog::new(vec![card("c1", "")], vec![]);
        assert!(catalog.image_urls().is_empty());
    }
}
