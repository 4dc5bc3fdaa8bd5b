use async_trait::async_trait;

use crate::domain::Prompt;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the history and the new user turn as one completion call and
    /// returns the reply text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
