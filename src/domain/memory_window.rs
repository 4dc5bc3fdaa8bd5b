use std::collections::VecDeque;

use super::Message;

pub const DEFAULT_MAX_MESSAGES: usize = 20;

/// Bounded history of a conversation. Pushing past `max_messages` drops the
/// oldest messages first.
#[derive(Debug, Clone)]
pub struct MemoryWindow {
    max_messages: usize,
    messages: VecDeque<Message>,
}

impl MemoryWindow {
    pub fn new(max_messages: usize) -> Self {
        let max_messages = max_messages.max(1);
        Self {
            max_messages,
            messages: VecDeque::with_capacity(max_messages),
        }
    }

    /// Appends a message and returns whatever was evicted to make room.
    pub fn push(&mut self, message: Message) -> Vec<Message> {
        self.messages.push_back(message);

        let mut evicted = Vec::new();
        while self.messages.len() > self.max_messages {
            if let Some(oldest) = self.messages.pop_front() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) -> Vec<Message> {
        messages
            .into_iter()
            .flat_map(|message| self.push(message))
            .collect()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }
}

impl Default for MemoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}
