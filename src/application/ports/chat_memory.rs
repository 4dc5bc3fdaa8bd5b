use async_trait::async_trait;

use crate::domain::{ConversationId, Message};

/// Windowed per-conversation history that is prepended to every completion.
#[async_trait]
pub trait ChatMemory: Send + Sync {
    /// Oldest first. Unknown conversations have an empty history.
    async fn history(&self, conversation_id: &ConversationId) -> Result<Vec<Message>, MemoryError>;

    async fn append(
        &self,
        conversation_id: &ConversationId,
        messages: Vec<Message>,
    ) -> Result<(), MemoryError>;

    async fn clear(&self, conversation_id: &ConversationId) -> Result<(), MemoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("memory storage failed: {0}")]
    StorageFailed(String),
}
