//! Best-Effort JSON Extraction
//!
//! Models asked for JSON-only output still wrap it in markdown fences or
//! prose often enough that every call site needs the same cleanup. This
//! module is the single utility for it: strip fences, fall back to outermost
//! brace/bracket matching, and fail with a typed error carrying a bounded
//! excerpt of the raw text for diagnostics.

/// Maximum number of characters of raw model output carried in diagnostics.
pub const EXCERPT_LEN: usize = 300;

/// Truncate raw model output to at most [`EXCERPT_LEN`] characters for
/// inclusion in error messages.
pub fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_LEN {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(EXCERPT_LEN).collect();
        format!("{}...", head)
    }
}

/// Failure to locate a JSON payload in model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExtractError {
    /// Truncated excerpt of the raw text, for diagnostics
    pub excerpt: String,
}

impl std::fmt::Display for JsonExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no JSON payload found in model output: {}", self.excerpt)
    }
}

impl std::error::Error for JsonExtractError {}

/// Extract a JSON object or array from model output.
///
/// Handles markdown code fences (with or without a language tag) first, then
/// falls back to the outermost `{...}` or `[...]` span. The returned string
/// is not validated as JSON; callers parse it and report their own errors.
pub fn extract_json(text: &str) -> Result<String, JsonExtractError> {
    let trimmed = text.trim();

    // Markdown code fences (```json ... ``` or ``` ... ```)
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip optional language identifier line
        let content_start = if let Some(nl) = after_fence.find('\n') {
            nl + 1
        } else {
            0
        };
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            let fenced = content[..end].trim();
            if !fenced.is_empty() {
                return Ok(fenced.to_string());
            }
        }
    }

    // Outermost object or array, whichever opens first
    let object_span = span(trimmed, '{', '}');
    let array_span = span(trimmed, '[', ']');
    let chosen = match (object_span, array_span) {
        (Some(o), Some(a)) => Some(if o.0 < a.0 { o } else { a }),
        (Some(o), None) => Some(o),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    };

    match chosen {
        Some((start, end)) => Ok(trimmed[start..=end].to_string()),
        None => Err(JsonExtractError {
            excerpt: excerpt(text),
        }),
    }
}

/// Byte span from the first `open` to the last `close`, if both exist in order.
fn span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start <= end {
        Some((start, end))
    } else {
        None
    }
}
