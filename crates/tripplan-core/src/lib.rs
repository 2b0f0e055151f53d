//! tripplan core: decoder and normalizer for model-generated suggestions.
//!
//! The upstream chat-completion API is treated as an untrusted text source.
//! [`decode`] walks the response layer by layer and either returns a
//! non-empty [`SuggestionSet`] or a [`DecodeError`] naming the stage that
//! broke.
//!
//! # Pipeline Flow
//!
//! ```text
//! body → envelope → message → content → suggestions → normalized
//!          ↓           ↓          ↓           ↓
//!     RootParse  Unexpected  ContentParse  NoSuggestions
//! ```

pub mod data_model;
pub mod decoder;
pub mod error;
pub mod fence;
pub mod normalize;
pub mod stage;

pub use data_model::{Suggestion, SuggestionSet, TimeOfDay};
pub use decoder::decode;
pub use error::{DecodeError, DecodeResult, ErrorKind};
pub use fence::strip_code_fence;
pub use normalize::{normalize_suggestion, normalize_suggestions};
pub use stage::DecodeStage;
