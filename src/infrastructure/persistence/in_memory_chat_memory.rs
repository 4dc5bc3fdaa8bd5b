use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{ChatMemory, MemoryError};
use crate::domain::{ConversationId, DEFAULT_MAX_MESSAGES, MemoryWindow, Message};

/// Per-conversation memory windows that live for the lifetime of the process.
pub struct InMemoryChatMemory {
    max_messages: usize,
    windows: RwLock<HashMap<ConversationId, MemoryWindow>>,
}

impl InMemoryChatMemory {
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages,
            windows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryChatMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

#[async_trait]
impl ChatMemory for InMemoryChatMemory {
    async fn history(&self, conversation_id: &ConversationId) -> Result<Vec<Message>, MemoryError> {
        Ok(self
            .windows
            .read()
            .await
            .get(conversation_id)
            .map(MemoryWindow::messages)
            .unwrap_or_default())
    }

    async fn append(
        &self,
        conversation_id: &ConversationId,
        messages: Vec<Message>,
    ) -> Result<(), MemoryError> {
        let mut windows = self.windows.write().await;
        let window = windows
            .entry(conversation_id.clone())
            .or_insert_with(|| MemoryWindow::new(self.max_messages));

        let evicted = window.extend(messages);
        if !evicted.is_empty() {
            tracing::debug!(
                conversation = %conversation_id,
                evicted = evicted.len(),
                "Evicted oldest messages from memory window"
            );
        }
        Ok(())
    }

    async fn clear(&self, conversation_id: &ConversationId) -> Result<(), MemoryError> {
        self.windows.write().await.remove(conversation_id);
        Ok(())
    }
}
