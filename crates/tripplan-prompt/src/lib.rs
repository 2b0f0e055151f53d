//! tripplan prompt: builds what is sent to the model.
//!
//! The user's travel prompt is combined with a JSON schema instruction and
//! a structure block derived from the requested mode and the trip length
//! stated in the prompt.
//!
//! # Example
//!
//! ```ignore
//! use tripplan_prompt::{build_chat_request, ChatOptions, PromptMode};
//!
//! let request = build_chat_request(
//!     "Lisbon with kids. Trip length: 3 days.",
//!     PromptMode::FullItinerary,
//!     &ChatOptions::default(),
//! );
//! assert_eq!(request.messages.len(), 2);
//! ```

pub mod days;
pub mod instructions;
pub mod request;

pub use days::{infer_days, total_suggestions, DEFAULT_DAYS, MAX_DAYS};
pub use instructions::{compose_user_prompt, structure_notes, system_instruction, PromptMode};
pub use request::{build_chat_request, ChatMessage, ChatOptions, ChatRequest};

/// Default cap on prompt length, in characters
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 6000;

/// Trim a user prompt and cap it at `max_chars` characters.
///
/// Returns `None` for a blank prompt.
pub fn clean_prompt(raw: &str, max_chars: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}
