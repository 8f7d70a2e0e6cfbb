//! Model reply parsing — fence stripping + JSON extraction.
//!
//! The remote model returns free text expected to contain one JSON object,
//! optionally wrapped in a markdown code fence. A fenced reply must parse to
//! the identical value as the bare reply.

use serde::de::DeserializeOwned;

/// Strip a surrounding markdown code fence, if any.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` openers; the info string
/// on the opening line is discarded. Text without a fence is returned
/// trimmed and otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((_, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    match body.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Parse a model reply into `T`.
///
/// Fences are stripped first. When the remainder still fails to parse and
/// the model surrounded the object with prose, the slice between the first
/// `{` and the last `}` is tried before giving up.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let candidate = strip_code_fence(text);
    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            if let (Some(start), Some(end)) = (candidate.find('{'), candidate.rfind('}')) {
                if start < end {
                    if let Ok(value) = serde_json::from_str(&candidate[start..=end]) {
                        return Ok(value);
                    }
                }
            }
            Err(first_err.to_string())
        }
    }
}
