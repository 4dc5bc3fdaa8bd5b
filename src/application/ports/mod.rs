mod chat_memory;
mod collection_config;
mod distance_metric;
mod embedder;
mod file_loader;
mod image_generator;
mod llm_client;
mod search_result;
mod text_splitter;
mod transcription_engine;
mod vector_store;
mod vector_store_error;

pub use chat_memory::{ChatMemory, MemoryError};
pub use collection_config::CollectionConfig;
pub use distance_metric::DistanceMetric;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use image_generator::{ImageGenerator, ImageGeneratorError};
pub use llm_client::{LlmClient, LlmClientError};
pub use search_result::SearchResult;
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
