use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::UploadedFile;
use crate::infrastructure::llm::OpenAiEndpoint;

const FALLBACK_FILENAME: &str = "audio.webm";
const FALLBACK_MIME: &str = "application/octet-stream";

pub struct OpenAiWhisperEngine {
    endpoint: OpenAiEndpoint,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(endpoint: OpenAiEndpoint, model: String) -> Self {
        Self { endpoint, model }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio: &UploadedFile) -> Result<String, TranscriptionError> {
        let filename = if audio.filename.is_empty() {
            FALLBACK_FILENAME.to_string()
        } else {
            audio.filename.clone()
        };
        let mime = audio.content_type.as_deref().unwrap_or(FALLBACK_MIME);

        let file_part = multipart::Part::bytes(audio.data.to_vec())
            .file_name(filename)
            .mime_str(mime)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to Whisper API");

        let response = self
            .endpoint
            .post(&self.model, "audio/transcriptions")
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("body: {}", e)))?;

        tracing::info!(chars = transcript.len(), "Whisper transcription completed");

        // response_format=text ends with a newline
        Ok(transcript.trim_end_matches(['\r', '\n']).to_string())
    }
}
