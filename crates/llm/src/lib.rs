pub mod extract;
pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use extract::{extract_structured, ExtractError};
pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("model API key is not configured")]
    NotConfigured,
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model reply carried no text")]
    EmptyReply,
}

/// One external text-generation round-trip. Implementations may fail for
/// network, auth, or quota reasons; callers convert failure into fallback
/// output at the call site, never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
