//! Decode stages, in execution order
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    EnvelopeParse,
    MessageExtraction,
    ContentParse,
    SuggestionExtraction,
    EmptinessCheck,
    Normalization,
}

impl DecodeStage {
    /// Stable stage ID (ex: "decode.envelope")
    pub fn id(self) -> &'static str {
        match self {
            DecodeStage::EnvelopeParse => "decode.envelope",
            DecodeStage::MessageExtraction => "decode.message",
            DecodeStage::ContentParse => "decode.content",
            DecodeStage::SuggestionExtraction => "decode.suggestions",
            DecodeStage::EmptinessCheck => "decode.non_empty",
            DecodeStage::Normalization => "decode.normalize",
        }
    }
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
