mod chunk;
mod conversation_id;
mod document;
mod embedding;
mod extracted_page;
mod image;
mod memory_window;
mod message;
mod message_role;
mod prompt;
mod upload;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use conversation_id::ConversationId;
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use extracted_page::ExtractedPage;
pub use image::{GeneratedImage, ImageRequest, ImageSize};
pub use memory_window::{DEFAULT_MAX_MESSAGES, MemoryWindow};
pub use message::Message;
pub use message_role::MessageRole;
pub use prompt::Prompt;
pub use upload::{ChatRequest, UploadedFile};
