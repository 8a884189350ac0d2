//! Error types for gacha-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rarity value: {0} (expected 1..=5)")]
    InvalidRarity(u8),

    #[error("Rarity rates must sum to 1.0, got {0}")]
    InvalidRates(f64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
