use async_trait::async_trait;

use crate::domain::{GeneratedImage, ImageRequest};

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, ImageGeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageGeneratorError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
