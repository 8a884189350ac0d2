//! Derived view builders
//!
//! Pure functions over the player state and catalog: inventory
//! aggregation and rank-from-points. Inventory entries whose card was
//! retired from the catalog are silently dropped rather than failing
//! the lookup.

use crate::catalog::{Card, Catalog};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One distinct owned card and how many copies the player holds
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub card: Card,
    pub count: u64,
}

/// Collection rank tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    C,
    B,
    A,
    S,
    Ss,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::Ss => "SS",
        };
        write!(f, "{s}")
    }
}

/// Inclusive point thresholds per rank, ascending
pub const RANK_THRESHOLDS: [(Rank, u64); 5] = [
    (Rank::C, 0),
    (Rank::B, 50),
    (Rank::A, 200),
    (Rank::S, 1000),
    (Rank::Ss, 2500),
];

/// Rank derived from collection points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankInfo {
    /// Highest rank whose threshold is met
    pub rank: Rank,
    /// Total collection points
    pub points: u64,
    /// Threshold of the next rank, `None` at the top
    pub next_rank_points: Option<u64>,
}

/// Group the owned card ids by id, counting duplicates
///
/// Distinct ids appear in first-appearance order. Ids that no longer
/// resolve against the catalog are dropped.
pub fn formatted_inventory(inventory: &[String], catalog: &Catalog) -> Vec<InventoryEntry> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for id in inventory {
        *counts.entry(id.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(id, count)| {
            catalog.card(id).map(|card| InventoryEntry {
                card: card.clone(),
                count,
            })
        })
        .collect()
}

/// Compute rank info from the owned card ids
///
/// Each resolvable copy is worth its rarity tier in points; copies of
/// retired cards score nothing.
pub fn rank_info(inventory: &[String], catalog: &Catalog) -> RankInfo {
    let points: u64 = inventory
        .iter()
        .filter_map(|id| catalog.card(id))
        .map(|card| card.rarity.points())
        .sum();

    let mut rank = Rank::C;
    for (candidate, threshold) in RANK_THRESHOLDS {
        if points >= threshold {
            rank = candidate;
        }
    }

    let next_rank_points = RANK_THRESHOLDS
        .iter()
        .find(|(candidate, _)| *candidate > rank)
        .map(|(_, threshold)| *threshold);

    RankInfo {
        rank,
        points,
        next_rank_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rarity::Rarity;

    fn card(id: &str, rarity: Rarity) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            rarity,
            image_url: String::new(),
            description: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                card("c1", Rarity::One),
                card("c2", Rarity::Three),
                card("c3", Rarity::Five),
            ],
            vec![],
        )
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inventory_groups_and_counts() {
        let entries = formatted_inventory(&ids(&["c1", "c2", "c1", "c1"]), &catalog());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].card.id, "c1");
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[1].card.id, "c2");
        assert_eq!(entries[1].count, 1);
    }

    #[test]
    fn test_inventory_drops_retired_cards() {
        let entries = formatted_inventory(&ids(&["gone", "c1", "gone"]), &catalog());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].card.id, "c1");
    }

    #[test]
    fn test_inventory_counts_invariant_under_permutation() {
        let a = formatted_inventory(&ids(&["c1", "c2", "c1", "c3"]), &catalog());
        let b = formatted_inventory(&ids(&["c3", "c1", "c1", "c2"]), &catalog());

        let mut a: Vec<(String, u64)> = a.into_iter().map(|e| (e.card.id, e.count)).collect();
        let mut b: Vec<(String, u64)> = b.into_iter().map(|e| (e.card.id, e.count)).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rank_points_sum_rarities() {
        let info = rank_info(&ids(&["c1", "c2", "c3", "gone"]), &catalog());
        assert_eq!(info.points, 1 + 3 + 5);
        assert_eq!(info.rank, Rank::C);
        assert_eq!(info.next_rank_points, Some(50));
    }

    #[test]
    fn test_rank_boundary_is_inclusive() {
        // 10 copies of a 5-point card = exactly the B threshold
        let inventory = ids(&["c3"; 10]);
        let info = rank_info(&inventory, &catalog());
        assert_eq!(info.points, 50);
        assert_eq!(info.rank, Rank::B);
        assert_eq!(info.next_rank_points, Some(200));
    }

    #[test]
    fn test_top_rank_has_no_next() {
        let inventory = ids(&["c3"; 500]);
        let info = rank_info(&inventory, &catalog());
        assert_eq!(info.points, 2500);
        assert_eq!(info.rank, Rank::Ss);
        assert_eq!(info.next_rank_points, None);
    }

    #[test]
    fn test_rank_is_monotonic_in_points() {
        let mut last = Rank::C;
        for copies in 0..=600 {
            let inventory = ids(&vec!["c3"; copies]);
            let info = rank_info(&inventory, &catalog());
            assert!(info.rank >= last);
            last = info.rank;
        }
    }
}
