use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder, VectorsConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ChunkId, DocumentId, Embedding};

pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
}

impl QdrantAdapter {
    pub fn new(url: &str, collection_name: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
        })
    }

    fn map_distance_metric(metric: &DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn payload_for(chunk: &Chunk) -> HashMap<String, Value> {
        let mut payload: HashMap<String, Value> = HashMap::new();
        payload.insert(
            "document_id".to_string(),
            Value::from(chunk.document_id.as_uuid().to_string()),
        );
        payload.insert("source".to_string(), Value::from(chunk.source.clone()));
        payload.insert("text".to_string(), Value::from(chunk.text.clone()));
        if let Some(page) = chunk.page {
            payload.insert("page".to_string(), Value::from(i64::from(page)));
        }
        payload.insert(
            "position".to_string(),
            Value::from(chunk.position as i64),
        );
        payload
    }

    /// Points without a parsable `document_id` or a `text` field are dropped.
    fn chunk_from_payload(chunk_id: Uuid, payload: &HashMap<String, Value>) -> Option<Chunk> {
        let document_id = Uuid::parse_str(payload.get("document_id")?.as_str()?).ok()?;
        let text = payload.get("text")?.as_str()?.to_string();
        let source = payload
            .get("source")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let page = payload
            .get("page")
            .and_then(|v| v.as_integer())
            .and_then(|v| u32::try_from(v).ok());
        let position = payload
            .get("position")
            .and_then(|v| v.as_integer())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or_default();

        Some(Chunk {
            id: ChunkId::from_uuid(chunk_id),
            document_id: DocumentId::from_uuid(document_id),
            source,
            text,
            page,
            position,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        if self.collection_exists().await? {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Self::map_distance_metric(&config.distance_metric),
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection_created");
        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self, chunks, embeddings), fields(collection = %self.collection_name, count = chunks.len()))]
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

        let points: Vec<PointStruct> = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(chunk, embedding)| {
                PointStruct::new(
                    PointId::from(chunk.id.as_uuid().to_string()),
                    embedding.values.clone(),
                    Self::payload_for(chunk),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, count = chunks.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    embedding.values.clone(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results: Vec<SearchResult> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk_id = match point.id?.point_id_options? {
                    PointIdOptions::Uuid(uuid) => Uuid::parse_str(&uuid).ok()?,
                    PointIdOptions::Num(_) => return None,
                };
                let chunk = Self::chunk_from_payload(chunk_id, &point.payload)?;
                Some(SearchResult::new(chunk, point.score))
            })
            .collect();

        Ok(results)
    }
}
