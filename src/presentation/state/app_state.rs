use std::sync::Arc;

use crate::application::services::{ChatService, ImageService, TranscriptionService};

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub image_service: Arc<ImageService>,
    pub transcription_service: Arc<TranscriptionService>,
    pub upload_limit_bytes: usize,
}
