#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parlance::application::ports::{
    ChatMemory, CollectionConfig, Embedder, EmbedderError, FileLoader, FileLoaderError,
    ImageGenerator, ImageGeneratorError, LlmClient, LlmClientError, SearchResult, TextSplitter,
    TextSplitterError, TranscriptionEngine, TranscriptionError, VectorStore, VectorStoreError,
};
use parlance::application::services::{
    ChatService, ImageService, IngestionService, RetrievalService, TranscriptionService,
};
use parlance::domain::{
    Chunk, Document, Embedding, ExtractedPage, GeneratedImage, ImageRequest, Prompt, UploadedFile,
};
use parlance::infrastructure::persistence::InMemoryChatMemory;
use parlance::presentation::AppState;

pub const TEST_TOP_K: usize = 4;
pub const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;
pub const FAKE_IMAGE_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Treats every upload as UTF-8 text on a single page. Files whose name
/// contains `corrupt` fail to parse.
pub struct FakeFileLoader;

#[async_trait::async_trait]
impl FileLoader for FakeFileLoader {
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<ExtractedPage>, FileLoaderError> {
        if document.filename.contains("corrupt") {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "cannot parse {}",
                document.filename
            )));
        }
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }
        Ok(vec![ExtractedPage::new(1, text)])
    }
}

/// One chunk per page.
pub struct WholePageSplitter;

#[async_trait::async_trait]
impl TextSplitter for WholePageSplitter {
    async fn split(
        &self,
        text: &str,
        document: &Document,
        page: Option<u32>,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Chunk::new(
            text.to_string(),
            document.id,
            document.filename.clone(),
            page,
            0,
        )])
    }
}

#[derive(Default)]
pub struct FakeEmbedder {
    pub calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Embedding::new(vec![1.0, 0.0, 0.0]))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|_| Embedding::new(vec![1.0, 0.0, 0.0]))
            .collect())
    }
}

/// Records every upsert and answers searches with a fixed result list.
#[derive(Default)]
pub struct RecordingVectorStore {
    pub upserts: Mutex<Vec<Vec<Chunk>>>,
    pub results: Vec<SearchResult>,
    pub search_calls: AtomicUsize,
}

impl RecordingVectorStore {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn upserted_sources(&self) -> Vec<String> {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .flat_map(|batch| batch.iter().map(|c| c.source.clone()))
            .collect()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl VectorStore for RecordingVectorStore {
    async fn create_collection(&self, _config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        Ok(true)
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
            return Err(VectorStoreError::UpsertFailed("length mismatch".to_string()));
        }
        self.upserts.lock().unwrap().push(chunks.to_vec());
        Ok(())
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.iter().take(top_k).cloned().collect())
    }
}

pub struct RecordingLlmClient {
    pub reply: String,
    pub prompts: Mutex<Vec<Prompt>>,
}

impl RecordingLlmClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.reply.clone())
    }
}

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed(
            "HTTP 500: model unavailable".to_string(),
        ))
    }
}

pub struct FakeTranscriber {
    pub text: String,
    pub received: Mutex<Vec<UploadedFile>>,
}

impl FakeTranscriber {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for FakeTranscriber {
    async fn transcribe(&self, audio: &UploadedFile) -> Result<String, TranscriptionError> {
        self.received.lock().unwrap().push(audio.clone());
        Ok(self.text.clone())
    }
}

pub struct FakeImageGenerator {
    pub b64_json: String,
    pub requests: Mutex<Vec<ImageRequest>>,
}

impl FakeImageGenerator {
    pub fn new(b64_json: &str) -> Self {
        Self {
            b64_json: b64_json.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, ImageGeneratorError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(GeneratedImage {
            b64_json: self.b64_json.clone(),
        })
    }
}

pub struct FailingImageGenerator;

#[async_trait::async_trait]
impl ImageGenerator for FailingImageGenerator {
    async fn generate(&self, _request: &ImageRequest) -> Result<GeneratedImage, ImageGeneratorError> {
        Err(ImageGeneratorError::RateLimited)
    }
}

pub fn chat_service(
    llm: Arc<dyn LlmClient>,
    store: Arc<RecordingVectorStore>,
    memory: Arc<dyn ChatMemory>,
) -> ChatService {
    let embedder = Arc::new(FakeEmbedder::default());
    let ingestion = Arc::new(IngestionService::new(
        Arc::new(FakeFileLoader),
        embedder.clone(),
        store.clone(),
        Arc::new(WholePageSplitter),
    ));
    let retrieval = Arc::new(RetrievalService::new(embedder, store, TEST_TOP_K, 0.0));
    ChatService::new(ingestion, retrieval, llm, memory)
}

pub fn app_state(
    llm: Arc<dyn LlmClient>,
    store: Arc<RecordingVectorStore>,
    images: Arc<dyn ImageGenerator>,
    transcriber: Arc<dyn TranscriptionEngine>,
) -> AppState {
    AppState {
        chat_service: Arc::new(chat_service(
            llm,
            store,
            Arc::new(InMemoryChatMemory::default()),
        )),
        image_service: Arc::new(ImageService::new(images)),
        transcription_service: Arc::new(TranscriptionService::new(transcriber)),
        upload_limit_bytes: TEST_UPLOAD_LIMIT,
    }
}

pub fn upload(filename: &str, content: &str) -> UploadedFile {
    UploadedFile::new(
        filename,
        Some("text/plain".to_string()),
        bytes::Bytes::from(content.to_string()),
    )
}

pub fn scored_chunk(text: &str, score: f32) -> SearchResult {
    SearchResult::new(
        Chunk::new(
            text.to_string(),
            parlance::domain::DocumentId::new(),
            "notes.pdf".to_string(),
            Some(1),
            0,
        ),
        score,
    )
}
