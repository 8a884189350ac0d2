//! Built-in catalog data and game constants
//!
//! Card and scout definitions live in code and are synced into the
//! persistent store at startup. Image paths carry a `?v=N` cache-buster
//! so a bumped version forces stale browser caches past old copies.

use crate::catalog::{Card, Catalog, Scout};
use crate::rarity::{Rarity, RarityRates};
use indexmap::IndexMap;

/// Credits deducted per draw
pub const GACHA_COST: i64 = 10;

/// Credits granted per claimed bonus slot
pub const DAILY_BONUS_CREDITS: i64 = 100;

/// Default display name for a fresh profile
pub const DEFAULT_USER_NAME: &str = "Guest User";

/// Per-tier draw weights (tier 1 first); must sum to 1.0
pub const RARITY_RATES: RarityRates = RarityRates::new([0.50, 0.30, 0.15, 0.045, 0.005]);

/// Cache-buster applied to card image paths
const CARD_IMAGE_VERSION: u32 = 2;

/// Cache-buster applied to scout banner paths
const BANNER_IMAGE_VERSION: u32 = 1;

/// Gift codes and their credit rewards, keyed by normalized code
pub fn gift_codes() -> IndexMap<String, i64> {
    IndexMap::from([
        ("WELCOME2025".to_string(), 100),
        ("OPENINGDAY".to_string(), 250),
        ("SEASONPASS".to_string(), 500),
    ])
}

/// The compiled-in catalog: every card volume plus the scout pools
pub fn builtin_catalog() -> Catalog {
    let vol1 = vol1_cards();
    let vol2 = vol2_cards();

    let scouts = vec![
        Scout {
            id: "vol1".to_string(),
            title: "2025 STADIUM COLLECTION".to_string(),
            description: "Selected shots from the 2025 season, \
                          covering home games from opening day onward.\n\
                          Over 200 digital cards across rarity \u{2605}1 to \u{2605}5.\n\
                          New designs added throughout the season."
                .to_string(),
            note: "Digital cards in this service are fan-made photographs \
                   edited for personal enjoyment."
                .to_string(),
            banner_image: banner_path("scout_banner.png"),
            banner_image_home: banner_path("scout_banner_home.png"),
            cards: vol1.clone(),
            cost: GACHA_COST,
            is_active: true,
            main_color: "#275b91".to_string(),
            sub_color: "#1e40af".to_string(),
        },
        Scout {
            id: "vol2".to_string(),
            title: "2025 SUMMER COLLECTION".to_string(),
            description: "A summer special: ballpark food, fireworks nights, \
                          and the moments between innings.\n\
                          Over 100 digital cards recorded during the 2025 season."
                .to_string(),
            note: "Food items reflect 2025 season availability and pricing."
                .to_string(),
            banner_image: banner_path("scout_banner_summer.png"),
            banner_image_home: banner_path("scout_banner_summer_home.png"),
            cards: vol2.clone(),
            cost: 5,
            is_active: false,
            main_color: "#275b91".to_string(),
            sub_color: "#ffffff".to_string(),
        },
    ];

    let mut cards = vol1;
    cards.extend(vol2);
    Catalog::new(cards, scouts)
}

fn banner_path(file: &str) -> String {
    format!("/assets/{file}?v={BANNER_IMAGE_VERSION}")
}

fn card(id: &str, name: &str, rarity: Rarity, image: &str, description: &str) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        image_url: format!("{image}?v={CARD_IMAGE_VERSION}"),
        description: description.to_string(),
    }
}

fn vol1_cards() -> Vec<Card> {
    vec![
        card(
            "v1_c1",
            "Opening Day Lineup",
            Rarity::One,
            "/cards/vol1/opening_day.jpg",
            "The 2025 season begins.",
        ),
        card(
            "v1_c2",
            "Seventh Inning Stretch",
            Rarity::One,
            "/cards/vol1/seventh_inning.jpg",
            "The whole stand on its feet.",
        ),
        card(
            "v1_c3",
            "Rain Delay",
            Rarity::One,
            "/cards/vol1/rain_delay.jpg",
            "Tarps out, umbrellas up.",
        ),
        card(
            "v1_c4",
            "Bullpen Warmup",
            Rarity::Two,
            "/cards/vol1/bullpen.jpg",
            "Fastballs at golden hour.",
        ),
        card(
            "v1_c5",
            "Outfield Catch",
            Rarity::Two,
            "/cards/vol1/outfield_catch.jpg",
            "Full extension at the wall.",
        ),
        card(
            "v1_c6",
            "Home Plate Celebration",
            Rarity::Three,
            "/cards/vol1/home_plate.jpg",
            "Walk-off in the twelfth.",
        ),
        card(
            "v1_c7",
            "Fireworks Night",
            Rarity::Three,
            "/cards/vol1/fireworks.jpg",
            "Post-game show over the scoreboard.",
        ),
        card(
            "v1_c8",
            "Grand Slam",
            Rarity::Four,
            "/cards/vol1/grand_slam.jpg",
            "Bases cleared in one swing.",
        ),
        card(
            "v1_c9",
            "Perfect Game Final Out",
            Rarity::Five,
            "/cards/vol1/perfect_game.jpg",
            "Twenty-seven up, twenty-seven down.",
        ),
    ]
}

fn vol2_cards() -> Vec<Card> {
    vec![
        card(
            "v2_c1",
            "Stadium Classic Lager",
            Rarity::One,
            "/cards/vol2/lager.jpg",
            "800 yen.",
        ),
        card(
            "v2_c2",
            "Night Game Curry",
            Rarity::Two,
            "/cards/vol2/curry.jpg",
            "Best eaten before the fifth inning.",
        ),
        card(
            "v2_c3",
            "Summer Festival Stand",
            Rarity::Three,
            "/cards/vol2/festival.jpg",
            "2025 Summer Special.",
        ),
        card(
            "v2_c4",
            "Lantern Night Finale",
            Rarity::Four,
            "/cards/vol2/lantern.jpg",
            "2025 Summer Special.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_card_ids_unique() {
        let catalog = builtin_catalog();
        let ids: HashSet<&str> = catalog.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.cards().len());
    }

    #[test]
    fn test_scout_cards_come_from_catalog() {
        let catalog = builtin_catalog();
        for scout in catalog.scouts() {
            for card in &scout.cards {
                assert!(catalog.card(&card.id).is_some(), "missing {}", card.id);
            }
        }
    }

    #[test]
    fn test_card_images_carry_version() {
        let catalog = builtin_catalog();
        for card in catalog.cards() {
            assert!(card.image_url.contains("?v="), "no version on {}", card.id);
        }
    }

    #[test]
    fn test_gift_codes_are_normalized() {
        for (code, amount) in gift_codes() {
            assert_eq!(code, code.to_uppercase().trim());
            assert!(amount > 0);
        }
    }
}
