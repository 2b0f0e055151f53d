//! Instruction text sent to the model.
//!
//! The per-day layout requested in full itinerary mode is a request to the
//! model only. Nothing downstream checks that the reply honours it.

use crate::days::{total_suggestions, SUGGESTIONS_PER_DAY};

/// How structured the requested plan is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    /// Loose ideas, days may be left empty
    #[default]
    Ideas,
    /// Exactly one morning/afternoon/evening slot per day
    FullItinerary,
}

impl PromptMode {
    /// `"full-itinerary"` selects the full plan; anything else is ideas.
    pub fn from_request(mode: Option<&str>) -> Self {
        match mode {
            Some("full-itinerary") => PromptMode::FullItinerary,
            _ => PromptMode::Ideas,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptMode::Ideas => "ideas",
            PromptMode::FullItinerary => "full-itinerary",
        }
    }
}

/// System message describing the JSON the model must return.
pub fn system_instruction() -> String {
    [
        "You are an expert travel planner for a simple itinerary builder.",
        "You ALWAYS respond with valid JSON only, no extra text.",
        "Return a single JSON object with a 'suggestions' array.",
        "Each suggestion MUST have: id (string), title (string), \
         timeOfDay ('morning'|'afternoon'|'evening'|'flex'), dayHint (number or null), \
         description (string), and notes (string).",
        "Use 'description' as a 3-5 sentence itinerary-style explanation in context of the day.",
        "Use 'notes' as a 1-2 sentence practical tip (ticket timing, reservations, dress code).",
        "Whenever possible you SHOULD ALSO include these extra fields in each suggestion:",
        "neighborhood (short area name, e.g. 'Alfama'),",
        "mapsSearch (a concise Google Maps search query, e.g. 'Se de Lisboa Lisbon'),",
        "travelTime (a short estimate like '15 min by metro from city center'),",
        "approxCost (rough price per person, e.g. '€15'),",
        "bookingLink (official booking or ticket URL if one exists),",
        "closedDays (weekdays the place is closed, e.g. 'Mondays'),",
        "sellOut (when tickets or tables tend to sell out, e.g. 'weekends in summer').",
        "Keep neighborhood, mapsSearch, and travelTime short and map-friendly.",
    ]
    .join(" ")
}

/// Mode-specific structure block appended to the user prompt.
pub fn structure_notes(mode: PromptMode, days: u32) -> String {
    match mode {
        PromptMode::FullItinerary => {
            let lines = [
                format!("The trip should last exactly {} day(s).", days),
                format!(
                    "You MUST return exactly {} suggestions in the \"suggestions\" array.",
                    total_suggestions(days)
                ),
                format!(
                    "Distribute suggestions evenly across the days so there are exactly {} suggestions per day.",
                    SUGGESTIONS_PER_DAY
                ),
                format!("For each day d (1 to {}) you MUST include exactly:", days),
                "- 1 suggestion with \"timeOfDay\": \"morning\"".to_string(),
                "- 1 suggestion with \"timeOfDay\": \"afternoon\"".to_string(),
                "- 1 suggestion with \"timeOfDay\": \"evening\"".to_string(),
                format!(
                    "Set \"dayHint\" to the correct day number (1-{}) for each suggestion.",
                    days
                ),
                "Keep titles short and scannable; keep description and notes concise.".to_string(),
            ];
            format!(
                "Trip structure constraints (full itinerary mode):\n{}",
                lines.join("\n")
            )
        }
        PromptMode::Ideas => {
            let lines = [
                format!("The trip is approximately {} day(s) long.", days),
                "You do NOT need to fill every day. Focus on high-quality ideas.".to_string(),
                "Use \"timeOfDay\" as \"morning\", \"afternoon\", \"evening\", or \"flex\" where it makes sense."
                    .to_string(),
                format!(
                    "Use \"dayHint\" between 1 and {} when the idea fits a specific day, or null when it's flexible.",
                    days
                ),
            ];
            format!(
                "Trip structure notes (loose ideas mode):\n{}",
                lines.join("\n")
            )
        }
    }
}

/// User prompt followed by the structure block.
pub fn compose_user_prompt(prompt: &str, mode: PromptMode, days: u32) -> String {
    format!("{}\n\n{}", prompt, structure_notes(mode, days))
}
