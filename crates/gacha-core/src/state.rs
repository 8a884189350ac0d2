//! The persisted player state aggregate
//!
//! `PlayerState` is the sole mutable aggregate. It serializes to the
//! JSON snapshot slot with camelCase field names; every field defaults
//! individually so snapshots written by older versions load cleanly.

use crate::data::DEFAULT_USER_NAME;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Mutable per-player state, persisted as one JSON object
///
/// Mutations happen exclusively through [`crate::GameCore`] operations,
/// each of which replaces the whole aggregate with a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerState {
    /// Credit balance
    pub credits: i64,
    /// Owned card ids, append-only; duplicates are meaningful
    pub inventory: Vec<String>,
    /// When the daily bonus was last claimed
    pub last_daily_bonus: Option<DateTime<Utc>>,
    /// Card showcased on the profile page
    pub profile_card_id: Option<String>,
    /// Display name
    pub user_name: String,
    /// Normalized gift codes already redeemed; strictly grows
    pub used_codes: IndexSet<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            credits: 0,
            inventory: Vec::new(),
            last_daily_bonus: None,
            profile_card_id: None,
            user_name: DEFAULT_USER_NAME.to_string(),
            used_codes: IndexSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_field_names_are_camel_case() {
        let mut state = PlayerState::default();
        state.credits = 42;
        state.inventory.push("v1_c1".to_string());
        state.used_codes.insert("WELCOME2025".to_string());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["credits"], 42);
        assert_eq!(json["inventory"][0], "v1_c1");
        assert!(json["lastDailyBonus"].is_null());
        assert!(json["profileCardId"].is_null());
        assert_eq!(json["userName"], "Guest User");
        assert_eq!(json["usedCodes"][0], "WELCOME2025");
    }

    #[test]
    fn test_missing_fields_default_individually() {
        let state: PlayerState = serde_json::from_str(r#"{"credits": 7}"#).unwrap();
        assert_eq!(state.credits, 7);
        assert!(state.inventory.is_empty());
        assert_eq!(state.user_name, "Guest User");
        assert!(state.used_codes.is_empty());
    }

    #[test]
    fn test_last_bonus_round_trips_as_iso8601() {
        let mut state = PlayerState::default();
        state.last_daily_bonus = Some("2025-08-25T12:00:00Z".parse().unwrap());

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("2025-08-25T12:00:00Z"));

        let back: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
