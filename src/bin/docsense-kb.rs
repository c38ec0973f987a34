use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use docsense::application::ports::{Embedder, TextSplitter};
use docsense::application::services::KnowledgeBaseBuilder;
use docsense::infrastructure::llm::OpenAiClient;
use docsense::infrastructure::observability::init_tracing;
use docsense::infrastructure::persistence::JsonKnowledgeBaseFile;
use docsense::infrastructure::storage::read_source_dir;
use docsense::infrastructure::text_processing::{HtmlTextAdapter, LineChunker};
use docsense::presentation::{Environment, Settings};

#[derive(Parser)]
#[command(name = "docsense-kb")]
#[command(version)]
#[command(about = "Build the chunked embeddings knowledge base from HTML sources", long_about = None)]
struct Cli {
    /// Directory with the .html/.htm/.txt sources.
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Knowledge base JSON file to (over)write.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum whitespace-separated tokens per chunk.
    #[arg(long, value_name = "NUM")]
    max_tokens: Option<usize>,

    /// Directory holding appsettings.toml.
    #[arg(long, value_name = "DIR", default_value = ".")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings =
        Settings::load(&cli.config_dir, environment).context("Failed to load configuration")?;
    init_tracing(&settings.logging.tracing_config(environment), "kb-builder");

    let data_dir = cli.data_dir.unwrap_or(settings.knowledge_base.data_dir);
    let output = cli.output.unwrap_or(settings.knowledge_base.path);
    let max_tokens = cli.max_tokens.unwrap_or(settings.knowledge_base.max_tokens);

    let sources = read_source_dir(&data_dir)
        .await
        .with_context(|| format!("Failed to read sources from {}", data_dir.display()))?;
    if sources.is_empty() {
        anyhow::bail!("no .html or .txt sources found in {}", data_dir.display());
    }
    tracing::info!(sources = sources.len(), data_dir = %data_dir.display(), "Building knowledge base");

    let embedder: Arc<dyn Embedder> =
        Arc::new(OpenAiClient::new(&settings.llm).context("Failed to create LLM client")?);
    let text_splitter: Arc<dyn TextSplitter> = Arc::new(LineChunker::new(max_tokens));
    let file_loader = Arc::new(HtmlTextAdapter::new().context("Failed to create HTML parser")?);
    let writer = Arc::new(JsonKnowledgeBaseFile::new(&output));

    let builder = KnowledgeBaseBuilder::new(file_loader, embedder, text_splitter, writer);
    let summary = builder.build(&sources).await?;

    for (file, chunks) in &summary.chunks_per_file {
        println!("  {} {file}: {chunks} chunk(s)", "•".cyan());
    }
    println!(
        "{} {} chunk(s) with {} dimensions written to {}",
        "✓".green(),
        summary.total_chunks,
        summary
            .dimensions
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no".to_string()),
        output.display()
    );

    Ok(())
}
