use std::sync::Arc;

use crate::application::ports::{ChatMemory, LlmClient, LlmClientError, MemoryError};
use crate::domain::{ChatRequest, Message};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_builder::{annotate_query, build_prompt};
use super::token_counter::count_tokens;
use super::{IngestionService, RetrievalError, RetrievalService};

/// Retrieval-augmented chat: ingests attached files, pulls matching context
/// and issues one completion with the conversation history prepended.
pub struct ChatService {
    ingestion_service: Arc<IngestionService>,
    retrieval_service: Arc<RetrievalService>,
    llm_client: Arc<dyn LlmClient>,
    memory: Arc<dyn ChatMemory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub ingested: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl ChatService {
    pub fn new(
        ingestion_service: Arc<IngestionService>,
        retrieval_service: Arc<RetrievalService>,
        llm_client: Arc<dyn LlmClient>,
        memory: Arc<dyn ChatMemory>,
    ) -> Self {
        Self {
            ingestion_service,
            retrieval_service,
            llm_client,
            memory,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(conversation = %request.conversation_id, files = request.files.len())
    )]
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        let ChatRequest {
            conversation_id,
            query,
            files,
        } = request;

        let mut ingested = Vec::new();
        let mut skipped = Vec::new();

        for file in &files {
            match self.ingestion_service.ingest(file).await {
                Ok(report) => ingested.push(report.filename),
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "Skipping file that failed ingestion");
                    skipped.push(SkippedFile {
                        filename: file.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let query = annotate_query(&query, !files.is_empty(), &ingested);
        tracing::debug!(query = %sanitize_prompt(&query), "Processing chat message");

        let context = self.retrieval_service.retrieve(&query).await?;
        let history = self.memory.history(&conversation_id).await?;
        let prompt = build_prompt(&query, &context, &history);

        tracing::debug!(
            history = prompt.history.len(),
            context_chunks = context.len(),
            prompt_tokens = count_tokens(&prompt.user),
            "Sending completion"
        );

        let reply = self.llm_client.complete(&prompt).await?;

        self.memory
            .append(
                &conversation_id,
                vec![Message::user(query), Message::assistant(reply.clone())],
            )
            .await?;

        tracing::info!(
            ingested = ingested.len(),
            skipped = skipped.len(),
            reply_chars = reply.len(),
            "Chat message answered"
        );

        Ok(ChatOutcome {
            reply,
            ingested,
            skipped,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("retrieval: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("memory: {0}")]
    Memory(#[from] MemoryError),
}
