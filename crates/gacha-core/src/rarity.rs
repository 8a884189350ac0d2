//! Rarity tiers and draw rate tables
//!
//! Cards are classified into five tiers, tier 1 being the most common
//! and tier 5 the rarest. Draw rates are a static table of per-tier
//! weights that must sum to 1.0; a single uniform sample in [0, 1) is
//! resolved against the cumulative bands.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card rarity tier (1 = common .. 5 = rarest)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rarity {
    /// Tier 1 (most common)
    #[default]
    One = 1,
    /// Tier 2
    Two = 2,
    /// Tier 3
    Three = 3,
    /// Tier 4
    Four = 4,
    /// Tier 5 (rarest)
    Five = 5,
}

impl Rarity {
    /// All tiers in ascending order
    pub const ALL: [Rarity; 5] = [
        Rarity::One,
        Rarity::Two,
        Rarity::Three,
        Rarity::Four,
        Rarity::Five,
    ];

    /// The tier as a plain integer (1..=5)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Collection points awarded per owned copy of this tier
    pub fn points(self) -> u64 {
        self as u64
    }
}

impl TryFrom<u8> for Rarity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Rarity::One),
            2 => Ok(Rarity::Two),
            3 => Ok(Rarity::Three),
            4 => Ok(Rarity::Four),
            5 => Ok(Rarity::Five),
            other => Err(Error::InvalidRarity(other)),
        }
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> u8 {
        rarity as u8
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{2605}{}", self.as_u8())
    }
}

/// Per-tier draw weights, indexed by tier 1..=5
///
/// The weights form cumulative probability bands: a uniform sample in
/// [0, 1) lands in the first band whose cumulative weight exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityRates {
    weights: [f64; 5],
}

impl RarityRates {
    /// Create a rate table from per-tier weights (tier 1 first)
    pub const fn new(weights: [f64; 5]) -> Self {
        Self { weights }
    }

    /// The weight configured for a tier
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights[rarity.as_u8() as usize - 1]
    }

    /// Check that the weights sum to 1.0 (within floating point tolerance)
    pub fn validate(&self) -> Result<()> {
        let sum: f64 = self.weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidRates(sum));
        }
        Ok(())
    }

    /// Resolve a uniform sample in [0, 1) to a tier via cumulative bands
    ///
    /// Samples past the last band edge (possible with weights summing
    /// below 1.0) resolve to tier 5.
    pub fn pick(&self, sample: f64) -> Rarity {
        let mut cumulative = 0.0;
        for rarity in Rarity::ALL {
            cumulative += self.weight(rarity);
            if sample < cumulative {
                return rarity;
            }
        }
        Rarity::Five
    }
}
