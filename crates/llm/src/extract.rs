use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model text is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Best-effort extraction of structured data from unstructured model text.
///
/// Models often wrap JSON in a markdown code fence; a json-tagged fence is
/// recognized first, then a plain fence, then the text is parsed as-is. A
/// missing closing fence is tolerated.
pub fn extract_structured(text: &str) -> Result<Value, ExtractError> {
    let candidate = strip_code_fence(text);
    Ok(serde_json::from_str(candidate.trim())?)
}

fn strip_code_fence(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some((_, after)) = text.split_once(fence) {
            return after.split("```").next().unwrap_or(after);
        }
    }
    text
}
