use std::sync::Arc;

use parlance::application::services::{IngestionError, IngestionService};

use crate::helpers::{FakeEmbedder, FakeFileLoader, RecordingVectorStore, WholePageSplitter, upload};

fn service(store: Arc<RecordingVectorStore>, embedder: Arc<FakeEmbedder>) -> IngestionService {
    IngestionService::new(
        Arc::new(FakeFileLoader),
        embedder,
        store,
        Arc::new(WholePageSplitter),
    )
}

#[tokio::test]
async fn given_text_file_when_ingesting_then_chunks_are_embedded_once_and_stored_once() {
    let store = Arc::new(RecordingVectorStore::default());
    let embedder = Arc::new(FakeEmbedder::default());

    let report = service(store.clone(), embedder.clone())
        .ingest(&upload("notes.txt", "Ownership rules."))
        .await
        .unwrap();

    assert_eq!(report.filename, "notes.txt");
    assert_eq!(report.page_count, 1);
    assert_eq!(report.chunk_count, 1);
    assert_eq!(embedder.call_count(), 1);
    assert_eq!(store.upsert_count(), 1);
    let batch = &store.upserts.lock().unwrap()[0];
    assert_eq!(batch[0].document_id, report.document_id);
    assert_eq!(batch[0].page, Some(1));
}

#[tokio::test]
async fn given_unparseable_file_when_ingesting_then_nothing_is_stored() {
    let store = Arc::new(RecordingVectorStore::default());
    let embedder = Arc::new(FakeEmbedder::default());

    let result = service(store.clone(), embedder.clone())
        .ingest(&upload("corrupt.pdf", "x"))
        .await;

    assert!(matches!(result, Err(IngestionError::FileLoading(_))));
    assert_eq!(embedder.call_count(), 0);
    assert_eq!(store.upsert_count(), 0);
}
