use bytes::Bytes;

use super::ConversationId;

/// A file part received over HTTP, before it is classified.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub conversation_id: ConversationId,
    pub query: String,
    pub files: Vec<UploadedFile>,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            conversation_id: ConversationId::default(),
            query: query.into(),
            files: Vec::new(),
        }
    }

    pub fn with_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    pub fn with_files(mut self, files: Vec<UploadedFile>) -> Self {
        self.files = files;
        self
    }
}
