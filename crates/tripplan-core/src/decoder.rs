//! Decoder: walks the upstream response stage by stage
//!
//! Fail-fast and linear. A broken envelope, missing content, unparsable
//! content or an empty list ends the request with the matching
//! [`ErrorKind`](crate::ErrorKind). Anything wrong inside a single record
//! is repaired by normalization instead.
use crate::data_model::SuggestionSet;
use crate::error::{DecodeError, DecodeResult};
use crate::fence::strip_code_fence;
use crate::normalize::normalize_suggestions;
use crate::stage::DecodeStage;
use serde_json::Value;
use tracing::debug;

const TARGET: &str = "tripplan::decode";

/// Model output found in the first choice.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Content<'a> {
    /// Already-structured JSON (structured output mode)
    Structured(&'a Value),
    /// JSON document emitted as plain text
    Text(&'a str),
}

/// Decode a raw upstream chat-completion body into suggestions.
pub fn decode(raw_upstream_text: &str) -> DecodeResult {
    let envelope: Value = serde_json::from_str(raw_upstream_text).map_err(|e| {
        debug!(target: TARGET, stage = %DecodeStage::EnvelopeParse, error = %e, "upstream body is not JSON");
        DecodeError::root_parse(raw_upstream_text)
    })?;

    let content = match extract_content(&envelope) {
        Some(content) => content,
        None => {
            debug!(target: TARGET, stage = %DecodeStage::MessageExtraction, "no usable message content");
            return Err(DecodeError::unexpected_format(envelope.clone()));
        }
    };

    let parsed = match content {
        Content::Structured(value) => value.clone(),
        Content::Text(text) => parse_content(text)?,
    };

    let raw_suggestions = extract_suggestions(&parsed);
    debug!(
        target: TARGET,
        stage = %DecodeStage::SuggestionExtraction,
        count = raw_suggestions.len(),
        "suggestions extracted"
    );

    if raw_suggestions.is_empty() {
        debug!(target: TARGET, stage = %DecodeStage::EmptinessCheck, "model returned no suggestions");
        return Err(DecodeError::no_suggestions(parsed));
    }

    let suggestions = normalize_suggestions(raw_suggestions);
    debug!(
        target: TARGET,
        stage = %DecodeStage::Normalization,
        count = suggestions.len(),
        "suggestions normalized"
    );

    Ok(SuggestionSet { suggestions })
}

/// First choice's message content. An object `content` is used as is; a
/// missing or null `content` falls back to a `parsed` object, which some
/// API versions return in structured output mode. Only an empty string
/// counts as missing; whitespace is left for the content parse to reject.
fn extract_content(envelope: &Value) -> Option<Content<'_>> {
    let message = envelope.pointer("/choices/0/message")?;

    match message.get("content") {
        Some(content @ Value::Object(_)) => Some(Content::Structured(content)),
        Some(Value::String(text)) if !text.is_empty() => Some(Content::Text(text)),
        None | Some(Value::Null) => message
            .get("parsed")
            .filter(|parsed| parsed.is_object())
            .map(Content::Structured),
        Some(_) => None,
    }
}

fn parse_content(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        debug!(target: TARGET, stage = %DecodeStage::ContentParse, error = %e, "model content is not JSON");
        DecodeError::content_parse(text)
    })
}

/// `suggestions` if it is a list, otherwise nothing.
fn extract_suggestions(parsed: &Value) -> &[Value] {
    parsed
        .get("suggestions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
