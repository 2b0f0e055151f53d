//! Decode error model
use crate::data_model::SuggestionSet;
use crate::stage::DecodeStage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type DecodeResult = Result<SuggestionSet, DecodeError>;

/// Pipeline-level failures. None of them are retried by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Upstream body is not valid JSON
    RootParseFailure,
    /// No usable message content in the envelope
    UnexpectedFormat,
    /// Model content string is not valid JSON
    ContentParseFailure,
    /// Parsed content carries zero suggestions
    NoSuggestions,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::RootParseFailure => "root_parse_failure",
            ErrorKind::UnexpectedFormat => "unexpected_format",
            ErrorKind::ContentParseFailure => "content_parse_failure",
            ErrorKind::NoSuggestions => "no_suggestions",
        }
    }

    /// Stage at which this kind is raised.
    pub fn stage(self) -> DecodeStage {
        match self {
            ErrorKind::RootParseFailure => DecodeStage::EnvelopeParse,
            ErrorKind::UnexpectedFormat => DecodeStage::MessageExtraction,
            ErrorKind::ContentParseFailure => DecodeStage::ContentParse,
            ErrorKind::NoSuggestions => DecodeStage::EmptinessCheck,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{}: {detail}", .kind.code())]
pub struct DecodeError {
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    pub detail: String,
    /// Offending input at the failing layer, kept for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl DecodeError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, raw: Option<Value>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            raw,
        }
    }

    pub fn root_parse(body: &str) -> Self {
        Self::new(
            ErrorKind::RootParseFailure,
            "could not parse upstream body",
            Some(Value::String(body.to_string())),
        )
    }

    pub fn unexpected_format(envelope: Value) -> Self {
        Self::new(
            ErrorKind::UnexpectedFormat,
            "content missing or wrong type",
            Some(envelope),
        )
    }

    pub fn content_parse(content: &str) -> Self {
        Self::new(
            ErrorKind::ContentParseFailure,
            "model content was not valid JSON",
            Some(Value::String(content.to_string())),
        )
    }

    pub fn no_suggestions(content: Value) -> Self {
        Self::new(
            ErrorKind::NoSuggestions,
            "model returned no suggestions",
            Some(content),
        )
    }
}
