use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter, TextSplitterError,
    VectorStore, VectorStoreError,
};
use crate::domain::{ContentType, Document, DocumentId, UploadedFile};

pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    text_splitter: Arc<dyn TextSplitter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionReport {
    pub document_id: DocumentId,
    pub filename: String,
    pub page_count: usize,
    pub chunk_count: usize,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        text_splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            vector_store,
            text_splitter,
        }
    }

    /// Extracts, splits, embeds and stores one uploaded file. All chunks of
    /// the file go to the vector store in a single upsert.
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename, bytes = file.data.len()))]
    pub async fn ingest(&self, file: &UploadedFile) -> Result<IngestionReport, IngestionError> {
        let content_type = ContentType::detect(file.content_type.as_deref(), &file.filename);
        let document = Document::new(
            file.filename.clone(),
            content_type,
            file.data.len() as u64,
        );

        let pages = self
            .file_loader
            .extract_pages(&file.data, &document)
            .await
            .map_err(IngestionError::FileLoading)?;

        let mut chunks = Vec::new();
        for page in &pages {
            let page_chunks = self
                .text_splitter
                .split(&page.text, &document, Some(page.number))
                .await
                .map_err(IngestionError::Splitting)?;
            chunks.extend(page_chunks);
        }

        if chunks.is_empty() {
            return Err(IngestionError::NoContent(document.filename));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(IngestionError::Embedding)?;

        self.vector_store
            .upsert(&chunks, &embeddings)
            .await
            .map_err(IngestionError::Storage)?;

        tracing::info!(
            document_id = %document.id.as_uuid(),
            pages = pages.len(),
            chunks = chunks.len(),
            "Document ingested"
        );

        Ok(IngestionReport {
            document_id: document.id,
            filename: document.filename,
            page_count: pages.len(),
            chunk_count: chunks.len(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("no chunks produced from {0}")]
    NoContent(String),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
}
