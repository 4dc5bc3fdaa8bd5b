use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::UploadedFile;

pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
}

impl TranscriptionService {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { engine }
    }

    #[tracing::instrument(skip(self, audio), fields(filename = %audio.filename, bytes = audio.data.len()))]
    pub async fn transcribe(&self, audio: &UploadedFile) -> Result<String, TranscribeError> {
        let transcription = self.engine.transcribe(audio).await?;
        tracing::info!(transcription = %transcription, "Transcription");
        Ok(transcription)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("transcription: {0}")]
    Engine(#[from] TranscriptionError),
}
