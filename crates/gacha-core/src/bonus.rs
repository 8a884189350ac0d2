//! Daily bonus slot math
//!
//! The day splits into two claim slots starting at 00:00 and 12:00
//! local time. A bonus is claimable when no claim has ever happened or
//! the last claim falls strictly before the current slot's start, which
//! bounds grants to one per slot however often the check fires.
//!
//! These functions are pure over the supplied clock; the recurring
//! timer lives in the session layer and only calls into them.

use chrono::{DateTime, Duration, Local, Timelike, Utc};

/// Start of the slot containing `now` (00:00 or 12:00 local)
pub fn slot_start(now: DateTime<Local>) -> DateTime<Local> {
    let hour = if now.hour() < 12 { 0 } else { 12 };
    now.with_hour(hour)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Whether a bonus is claimable given the last claim time
pub fn bonus_available(last_claim: Option<DateTime<Utc>>, now: DateTime<Local>) -> bool {
    match last_claim {
        None => true,
        Some(last) => last.with_timezone(&Local) < slot_start(now),
    }
}

/// When the next bonus can be claimed
///
/// Reports `now` when a bonus is currently claimable, otherwise the
/// start of the next slot.
pub fn next_bonus_at(last_claim: Option<DateTime<Utc>>, now: DateTime<Local>) -> DateTime<Local> {
    if bonus_available(last_claim, now) {
        now
    } else {
        slot_start(now) + Duration::hours(12)
    }
}
