mod chat_service;
mod image_service;
mod ingestion_service;
pub mod prompt_builder;
mod retrieval_service;
mod token_counter;
mod transcription_service;

pub use chat_service::{ChatError, ChatOutcome, ChatService, SkippedFile};
pub use image_service::{ImageError, ImageService};
pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use prompt_builder::{annotate_query, build_prompt, render_context, render_user_prompt};
pub use retrieval_service::{RetrievalError, RetrievalService};
pub use token_counter::count_tokens;
pub use transcription_service::{TranscribeError, TranscriptionService};
