use std::sync::Arc;

use crate::application::ports::{ImageGenerator, ImageGeneratorError};
use crate::domain::ImageRequest;
use crate::infrastructure::observability::sanitize_prompt;

pub struct ImageService {
    generator: Arc<dyn ImageGenerator>,
}

impl ImageService {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Returns the base64 encoded image for a single 1024x1024 generation.
    #[tracing::instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let request = ImageRequest::single(prompt);
        tracing::debug!(prompt = %sanitize_prompt(prompt), size = %request.size, "Generating image");

        let image = self.generator.generate(&request).await?;
        if image.b64_json.is_empty() {
            return Err(ImageError::Generation(ImageGeneratorError::InvalidResponse(
                "image data is empty".to_string(),
            )));
        }

        tracing::info!(bytes_b64 = image.b64_json.len(), "Image generated");
        Ok(image.b64_json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image generation: {0}")]
    Generation(#[from] ImageGeneratorError),
}
