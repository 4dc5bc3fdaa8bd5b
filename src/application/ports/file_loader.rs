use async_trait::async_trait;

use crate::domain::{Document, ExtractedPage};

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Pages without any text are left out.
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<ExtractedPage>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
