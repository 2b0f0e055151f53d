//! Trip length inference.
//!
//! The front end embeds a line like `Trip length: 4 days.` in the prompt.
//! The number drives how many suggestions are requested, so it is clamped
//! to keep the output bounded.

use lazy_static::lazy_static;
use regex::Regex;

/// Used when the prompt does not state a usable length
pub const DEFAULT_DAYS: u32 = 3;

/// Upper bound on requested days
pub const MAX_DAYS: u32 = 7;

/// One morning, afternoon and evening slot per day
pub const SUGGESTIONS_PER_DAY: u32 = 3;

lazy_static! {
    static ref TRIP_LENGTH: Regex = Regex::new(r"(?i)trip length:\s*(\d+)\s*days?").unwrap();
}

/// Number of days stated in the prompt, clamped to `1..=MAX_DAYS`.
pub fn infer_days(prompt: &str) -> u32 {
    let stated = TRIP_LENGTH
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        // Digits only, so the sole failure is overflow
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .filter(|&n| n > 0);

    match stated {
        Some(n) => n.min(MAX_DAYS as u64) as u32,
        None => DEFAULT_DAYS,
    }
}

/// Total suggestions requested in full itinerary mode.
pub fn total_suggestions(days: u32) -> u32 {
    days * SUGGESTIONS_PER_DAY
}
