use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ImageGenerator, ImageGeneratorError};
use crate::domain::{GeneratedImage, ImageRequest};
use crate::infrastructure::llm::OpenAiEndpoint;

pub struct OpenAiImageGenerator {
    endpoint: OpenAiEndpoint,
    model: String,
}

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: String,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}

impl OpenAiImageGenerator {
    pub fn new(endpoint: OpenAiEndpoint, model: String) -> Self {
        Self { endpoint, model }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, size = %request.size, n = request.count))]
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, ImageGeneratorError> {
        let request_body = ImageGenerationRequest {
            model: &self.model,
            prompt: &request.prompt,
            n: request.count,
            size: request.size.to_string(),
            response_format: "b64_json",
        };

        let response = self
            .endpoint
            .post(&self.model, "images/generations")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ImageGeneratorError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ImageGeneratorError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGeneratorError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generation: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ImageGeneratorError::InvalidResponse(e.to_string()))?;

        generation
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .map(|b64_json| GeneratedImage { b64_json })
            .ok_or_else(|| ImageGeneratorError::InvalidResponse("no image data".to_string()))
    }
}
