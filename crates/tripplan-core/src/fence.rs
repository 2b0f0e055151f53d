//! Markdown code-fence stripping for model output.
//!
//! Models asked for "JSON only" still wrap it in ```` ```json ```` blocks
//! now and then. Only a full wrapper is removed: an opening fence line and
//! a closing fence, both present. Anything else is returned trimmed and
//! otherwise untouched.

const FENCE: &str = "```";

/// Strip a surrounding fenced code block, if there is one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    // Opening line carries the optional language tag
    let Some((_, rest)) = trimmed.split_once('\n') else {
        return trimmed;
    };
    match rest.trim_end().strip_suffix(FENCE) {
        Some(body) => body.trim(),
        None => trimmed,
    }
}
