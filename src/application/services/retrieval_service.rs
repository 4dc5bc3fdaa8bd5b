use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, SearchResult, VectorStore, VectorStoreError,
};

/// Looks up the chunks most similar to a query.
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    top_k: usize,
    similarity_threshold: f32,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            top_k,
            similarity_threshold,
        }
    }

    #[tracing::instrument(skip(self, query), fields(top_k = self.top_k))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = self
            .vector_store
            .search(&query_embedding, self.top_k)
            .await
            .map_err(RetrievalError::Search)?;

        let found = results.len();
        let relevant: Vec<SearchResult> = results
            .into_iter()
            .filter(|r| r.score >= self.similarity_threshold)
            .take(self.top_k)
            .collect();

        tracing::debug!(
            found,
            kept = relevant.len(),
            threshold = self.similarity_threshold,
            "Retrieved context"
        );

        Ok(relevant)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
}
