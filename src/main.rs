use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use parlance::application::ports::{
    CollectionConfig, Embedder, FileLoader, ImageGenerator, LlmClient, TranscriptionEngine,
    VectorStore,
};
use parlance::application::services::{
    ChatService, ImageService, IngestionService, RetrievalService, TranscriptionService,
};
use parlance::infrastructure::audio::OpenAiWhisperEngine;
use parlance::infrastructure::image::OpenAiImageGenerator;
use parlance::infrastructure::llm::{OpenAiClient, OpenAiEmbedder, OpenAiEndpoint};
use parlance::infrastructure::observability::{TracingConfig, init_tracing};
use parlance::infrastructure::persistence::{InMemoryChatMemory, VectorStoreFactory};
use parlance::infrastructure::text_processing::{CompositeFileLoader, TextSplitterFactory};
use parlance::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!("Failed to parse APP_ENVIRONMENT: {e}"))?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    let tracing_config = TracingConfig::new(environment.as_str(), settings.logging.json)
        .with_default_filter(settings.logging.filter.clone());
    init_tracing(&tracing_config)?;

    if settings.openai.api_key.is_empty() {
        tracing::warn!("No API key configured; upstream calls will be rejected");
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.openai.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let endpoint = OpenAiEndpoint::new(
        http_client,
        settings.openai.provider,
        &settings.openai.base_url,
        settings.openai.api_key.clone(),
    )
    .with_api_version(settings.openai.api_version.clone());

    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(
        endpoint.clone(),
        settings.openai.chat_model.clone(),
        settings.openai.temperature,
    ));
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        endpoint.clone(),
        settings.openai.embedding_model.clone(),
    ));
    let image_generator: Arc<dyn ImageGenerator> = Arc::new(OpenAiImageGenerator::new(
        endpoint.clone(),
        settings.openai.image_model.clone(),
    ));
    let transcription_engine: Arc<dyn TranscriptionEngine> = Arc::new(OpenAiWhisperEngine::new(
        endpoint,
        settings.openai.transcription_model.clone(),
    ));

    let vector_store = VectorStoreFactory::create(
        settings.vector_store.provider,
        &settings.vector_store.url,
        &settings.vector_store.collection_name,
    )
    .context("Failed to create vector store")?;

    let created = vector_store
        .create_collection(
            &CollectionConfig::new(settings.vector_store.dimension)
                .with_distance_metric(settings.vector_store.distance),
        )
        .await
        .context("Failed to prepare vector collection")?;
    tracing::info!(
        provider = ?settings.vector_store.provider,
        collection = %settings.vector_store.collection_name,
        distance = ?settings.vector_store.distance,
        created,
        "Vector store ready"
    );

    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::with_default_adapters());
    let text_splitter = TextSplitterFactory::create(&settings.chunking.options())
        .context("Failed to create text splitter")?;

    let ingestion_service = Arc::new(IngestionService::new(
        file_loader,
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
        text_splitter,
    ));
    let retrieval_service = Arc::new(RetrievalService::new(
        embedder,
        vector_store,
        settings.retrieval.top_k,
        settings.retrieval.similarity_threshold,
    ));
    let memory = Arc::new(InMemoryChatMemory::new(settings.memory.max_messages));

    let state = AppState {
        chat_service: Arc::new(ChatService::new(
            ingestion_service,
            retrieval_service,
            llm_client,
            memory,
        )),
        image_service: Arc::new(ImageService::new(image_generator)),
        transcription_service: Arc::new(TranscriptionService::new(transcription_engine)),
        upload_limit_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid server host '{}'", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
