mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, LoggingSettings, MemorySettings, OpenAiSettings, RetrievalSettings,
    ServerSettings, Settings, VectorStoreSettings,
};
