use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, Embedding};

struct StoredPoint {
    chunk: Chunk,
    embedding: Embedding,
}

/// Brute-force search over points held in process memory.
///
/// Scores follow the collection's metric the way Qdrant reports them:
/// cosine and dot product rank highest first, euclidean distance lowest first.
#[derive(Default)]
pub struct InMemoryVectorStore {
    points: RwLock<Vec<StoredPoint>>,
    distance_metric: RwLock<DistanceMetric>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.points.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.points.read().await.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(
        &self,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        *self.distance_metric.write().await = config.distance_metric;
        Ok(false)
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(true)
    }

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let mut points = self.points.write().await;
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            let point = StoredPoint {
                chunk: chunk.clone(),
                embedding: embedding.clone(),
            };
            match points.iter_mut().find(|p| p.chunk.id == chunk.id) {
                Some(existing) => *existing = point,
                None => points.push(point),
            }
        }

        tracing::debug!(count = chunks.len(), total = points.len(), "points_upserted");
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let metric = *self.distance_metric.read().await;
        let points = self.points.read().await;

        let mut results: Vec<SearchResult> = points
            .iter()
            .map(|p| {
                let score = match metric {
                    DistanceMetric::Cosine => p.embedding.cosine_similarity(embedding),
                    DistanceMetric::DotProduct => p.embedding.dot_product(embedding),
                    DistanceMetric::Euclidean => p.embedding.euclidean_distance(embedding),
                };
                SearchResult::new(p.chunk.clone(), score)
            })
            .collect();

        match metric {
            DistanceMetric::Euclidean => results.sort_by(|a, b| a.score.total_cmp(&b.score)),
            _ => results.sort_by(|a, b| b.score.total_cmp(&a.score)),
        }
        results.truncate(top_k);
        Ok(results)
    }
}
