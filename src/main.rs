use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docsense::application::ports::Embedder;
use docsense::application::services::{DocumentService, IntakeService, RetrievalService};
use docsense::infrastructure::llm::OpenAiClient;
use docsense::infrastructure::observability::init_tracing;
use docsense::infrastructure::persistence::{InMemoryKnowledgeStore, JsonKnowledgeBaseFile};
use docsense::infrastructure::storage::read_few_shot_example;
use docsense::infrastructure::text_processing::AzureDocIntelAdapter;
use docsense::presentation::{AppState, Environment, Settings, create_router};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings =
        Settings::load(Path::new("."), environment).context("Failed to load configuration")?;

    init_tracing(&settings.logging.tracing_config(environment), "server");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.server.workers.max(1))
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(serve(settings))
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let kb_file = JsonKnowledgeBaseFile::new(&settings.knowledge_base.path);
    let knowledge_base = kb_file.load().await.with_context(|| {
        format!(
            "Failed to load knowledge base from {} (run docsense-kb first)",
            kb_file.path().display()
        )
    })?;
    let knowledge_store = Arc::new(InMemoryKnowledgeStore::new(knowledge_base));

    let llm_client =
        Arc::new(OpenAiClient::new(&settings.llm).context("Failed to create LLM client")?);
    let ocr_client = Arc::new(
        AzureDocIntelAdapter::new(&settings.ocr).context("Failed to create OCR client")?,
    );

    let mut document_service = DocumentService::new(ocr_client, Arc::clone(&llm_client));
    if let (Some(ocr_path), Some(json_path)) = (
        &settings.extraction.few_shot_ocr_path,
        &settings.extraction.few_shot_json_path,
    ) {
        let example = read_few_shot_example(ocr_path, json_path)
            .await
            .context("Failed to load few-shot example")?;
        document_service = document_service.with_few_shot(example);
    }

    let embedder: Arc<dyn Embedder> = llm_client.clone();
    let retrieval_service = RetrievalService::new(
        embedder,
        Arc::clone(&llm_client),
        knowledge_store,
        settings.knowledge_base.distance_threshold,
        settings.knowledge_base.max_matches,
    );

    let state = AppState {
        document_service: Arc::new(document_service),
        retrieval_service: Arc::new(retrieval_service),
        intake_service: Arc::new(IntakeService::new(llm_client)),
        max_upload_bytes: settings.server.max_upload_bytes,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        workers = settings.server.workers,
        "Application started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
