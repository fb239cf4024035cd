//! Remote scorer: pluggable, trait-based backend that turns a prompt into a raw model reply.
//!
//! `AppState` holds an `Arc<dyn Scorer>`. Production uses `GeminiScorer`;
//! tests swap in canned replies without touching the handler.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

/// Implement this to swap the remote model without touching the endpoint or handler.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Sends the rendered prompt and returns the model's raw text reply.
    async fn score(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Scores through the Gemini `generateContent` API.
pub struct GeminiScorer(pub LlmClient);

#[async_trait]
impl Scorer for GeminiScorer {
    async fn score(&self, prompt: &str) -> Result<String, LlmError> {
        self.0.generate(prompt).await
    }
}
