use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::ports::DistanceMetric;
use crate::infrastructure::llm::ApiProvider;
use crate::infrastructure::persistence::VectorStoreProvider;
use crate::infrastructure::text_processing::{ChunkingOptions, ChunkingStrategy};

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub vector_store: VectorStoreSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub memory: MemorySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub provider: ApiProvider,
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub image_model: String,
    pub transcription_model: String,
    pub temperature: Option<f32>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreSettings {
    pub provider: VectorStoreProvider,
    pub url: String,
    pub collection_name: String,
    pub dimension: u64,
    pub distance: DistanceMetric,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub strategy: ChunkingStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_chunk_size_chars: usize,
    pub min_chunk_length_to_embed: usize,
    pub max_num_chunks: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemorySettings {
    pub max_messages: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
    pub filter: String,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl ChunkingSettings {
    pub fn options(&self) -> ChunkingOptions {
        ChunkingOptions {
            strategy: self.strategy,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            min_chunk_size_chars: self.min_chunk_size_chars,
            min_chunk_length_to_embed: self.min_chunk_length_to_embed,
            max_num_chunks: self.max_num_chunks,
        }
    }
}

impl Settings {
    /// Defaults, then `appsettings.<env>` (any format `config` reads, optional),
    /// then `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let builder = Self::with_defaults(Config::builder())?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::finish(Self::with_defaults(Config::builder())?)
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.max_upload_mb", 50_i64)?
            .set_default("openai.provider", "openai")?
            .set_default("openai.api_key", "")?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.api_version", "2024-10-21")?
            .set_default("openai.chat_model", "gpt-4o-mini")?
            .set_default("openai.embedding_model", "text-embedding-3-small")?
            .set_default("openai.image_model", "dall-e-3")?
            .set_default("openai.transcription_model", "whisper-1")?
            .set_default("openai.request_timeout_secs", 120_i64)?
            .set_default("vector_store.provider", "memory")?
            .set_default("vector_store.url", "http://localhost:6334")?
            .set_default("vector_store.collection_name", "chat_documents")?
            .set_default("vector_store.dimension", 1536_i64)?
            .set_default("vector_store.distance", "cosine")?
            .set_default("chunking.strategy", "token")?
            .set_default("chunking.chunk_size", 800_i64)?
            .set_default("chunking.chunk_overlap", 0_i64)?
            .set_default("chunking.min_chunk_size_chars", 350_i64)?
            .set_default("chunking.min_chunk_length_to_embed", 5_i64)?
            .set_default("chunking.max_num_chunks", 10_000_i64)?
            .set_default("retrieval.top_k", 4_i64)?
            .set_default("retrieval.similarity_threshold", 0.0_f64)?
            .set_default("memory.max_messages", 20_i64)?
            .set_default("logging.json", false)?
            .set_default(
                "logging.filter",
                crate::infrastructure::observability::DEFAULT_LOG_FILTER,
            )
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if settings.openai.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                settings.openai.api_key = key;
            }
        }

        Ok(settings)
    }
}
