use std::sync::Arc;

use serde::Deserialize;

use super::{InMemoryVectorStore, QdrantAdapter};
use crate::application::ports::{VectorStore, VectorStoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreProvider {
    Qdrant,
    Memory,
}

pub struct VectorStoreFactory;

impl VectorStoreFactory {
    pub fn create(
        provider: VectorStoreProvider,
        url: &str,
        collection_name: &str,
    ) -> Result<Arc<dyn VectorStore>, VectorStoreError> {
        match provider {
            VectorStoreProvider::Qdrant => {
                let adapter = QdrantAdapter::new(url, collection_name.to_string())?;
                Ok(Arc::new(adapter))
            }
            VectorStoreProvider::Memory => Ok(Arc::new(InMemoryVectorStore::new())),
        }
    }
}
