//! Per-record normalization.
//!
//! Turns one loosely-shaped suggestion object from the model into a
//! [`Suggestion`]. Every field has a default, so this never fails and never
//! drops a record: a string, a number or `null` in the list still yields a
//! suggestion carrying only defaults.
//!
//! Normalizing an already-normalized record gives the same record back.

use crate::data_model::{Suggestion, TimeOfDay};
use serde_json::Value;

pub const DEFAULT_TITLE: &str = "Activity";
pub const FALLBACK_ID_PREFIX: &str = "ai-suggestion-";

/// Normalize a whole list, in order. `index` for the fallback id is 1-based.
pub fn normalize_suggestions(raw: &[Value]) -> Vec<Suggestion> {
    raw.iter()
        .enumerate()
        .map(|(i, item)| normalize_suggestion(item, i + 1))
        .collect()
}

/// Normalize a single record at 1-based position `index`.
pub fn normalize_suggestion(raw: &Value, index: usize) -> Suggestion {
    Suggestion {
        id: id_field(raw).unwrap_or_else(|| format!("{}{}", FALLBACK_ID_PREFIX, index)),
        title: text_field(raw, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        time_of_day: raw
            .get("timeOfDay")
            .and_then(Value::as_str)
            .map(TimeOfDay::parse_lenient)
            .unwrap_or_default(),
        day_hint: raw.get("dayHint").and_then(day_hint),
        description: text_field(raw, "description").unwrap_or_default(),
        notes: text_field(raw, "notes").unwrap_or_default(),
        neighborhood: text_field(raw, "neighborhood"),
        travel_time: text_field(raw, "travelTime"),
        maps_search: text_field(raw, "mapsSearch"),
        approx_cost: text_field(raw, "approxCost"),
        booking_link: text_field(raw, "bookingLink"),
        closed_days: text_field(raw, "closedDays"),
        sell_out: text_field(raw, "sellOut"),
    }
}

/// Trimmed, non-blank string field.
fn text_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Models sometimes emit numeric ids; keep them rather than renumbering.
fn id_field(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        _ => text_field(raw, "id"),
    }
}

fn day_hint(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}
