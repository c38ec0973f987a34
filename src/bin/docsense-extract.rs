use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use docsense::application::services::DocumentService;
use docsense::domain::{
    ContentType, Document, DynamicReport, FormLanguage, GroundTruthReport, normalize_keys,
    validate_dynamic, validate_with_ground_truth,
};
use docsense::infrastructure::llm::OpenAiClient;
use docsense::infrastructure::observability::init_tracing;
use docsense::infrastructure::storage::read_few_shot_example;
use docsense::infrastructure::text_processing::AzureDocIntelAdapter;
use docsense::presentation::{Environment, Settings};

type Service = DocumentService<AzureDocIntelAdapter, OpenAiClient>;

#[derive(Parser)]
#[command(name = "docsense-extract")]
#[command(version)]
#[command(about = "OCR scanned documents and process the text with an LLM", long_about = None)]
struct Cli {
    /// PDF, JPEG or PNG documents to process.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Ask a question about each document instead of extracting form fields.
    #[arg(short, long, conflicts_with = "summary")]
    question: Option<String>,

    /// Summarize each document instead of extracting form fields.
    #[arg(short, long)]
    summary: bool,

    /// Directory with `{stem}_gt.json` ground-truth files.
    #[arg(long, value_name = "DIR")]
    ground_truth_dir: Option<PathBuf>,

    /// Directory the extracted JSON is written to.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    #[arg(long, value_name = "NUM", default_value_t = 2)]
    parallel: usize,

    /// Directory holding appsettings.toml.
    #[arg(long, value_name = "DIR", default_value = ".")]
    config_dir: PathBuf,
}

enum Mode {
    Fields {
        ground_truth_dir: PathBuf,
        output_dir: PathBuf,
    },
    Ask(Option<String>),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings =
        Settings::load(&cli.config_dir, environment).context("Failed to load configuration")?;
    init_tracing(&settings.logging.tracing_config(environment), "extract");

    let ocr_client = Arc::new(
        AzureDocIntelAdapter::new(&settings.ocr).context("Failed to create OCR client")?,
    );
    let llm_client =
        Arc::new(OpenAiClient::new(&settings.llm).context("Failed to create LLM client")?);

    let mut service = DocumentService::new(ocr_client, llm_client);
    if let (Some(ocr_path), Some(json_path)) = (
        &settings.extraction.few_shot_ocr_path,
        &settings.extraction.few_shot_json_path,
    ) {
        let example = read_few_shot_example(ocr_path, json_path)
            .await
            .context("Failed to load few-shot example")?;
        service = service.with_few_shot(example);
    }
    let service = Arc::new(service);

    let mode = if cli.summary || cli.question.is_some() {
        Mode::Ask(cli.question.clone())
    } else {
        Mode::Fields {
            ground_truth_dir: cli
                .ground_truth_dir
                .clone()
                .unwrap_or_else(|| settings.extraction.ground_truth_dir.clone()),
            output_dir: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| settings.extraction.output_dir.clone()),
        }
    };
    let mode = Arc::new(mode);

    let results = stream::iter(cli.files.iter().cloned().map(|path| {
        let service = Arc::clone(&service);
        let mode = Arc::clone(&mode);
        async move {
            let result = process_file(&service, &mode, &path).await;
            (path, result)
        }
    }))
    .buffer_unordered(cli.parallel.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut failures = 0;
    for (path, result) in results {
        if let Err(e) = result {
            failures += 1;
            tracing::error!(path = %path.display(), error = %e, "Failed to process document");
            eprintln!("{} {}: {:#}", "✗".red(), path.display(), e);
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} document(s) failed");
    }
    Ok(())
}

async fn process_file(service: &Service, mode: &Mode, path: &Path) -> Result<()> {
    let content_type = ContentType::from_path(path)
        .filter(ContentType::is_scannable)
        .with_context(|| format!("unsupported file type: {}", path.display()))?;
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let document = Document::new(filename, content_type, data.len() as u64);

    match mode {
        Mode::Ask(question) => {
            let answer = service.ask(&data, &document, question.as_deref()).await?;
            println!("{}", format!("── {} ──", document.filename).cyan().bold());
            println!("{}", answer.response.trim());
        }
        Mode::Fields {
            ground_truth_dir,
            output_dir,
        } => {
            let extraction = service.extract_fields(&data, &document).await?;
            let fields = normalize_keys(&extraction.fields);

            tokio::fs::create_dir_all(output_dir).await?;
            let output_path = output_dir.join(format!("{}.json", document.stem()));
            tokio::fs::write(&output_path, serde_json::to_string_pretty(&fields)?)
                .await
                .with_context(|| format!("failed to write {}", output_path.display()))?;

            println!("{}", format!("── {} ──", document.filename).cyan().bold());
            println!("Extracted fields saved to {}", output_path.display());

            let gt_path = ground_truth_dir.join(format!("{}_gt.json", document.stem()));
            match read_ground_truth(&gt_path).await? {
                Some(ground_truth) => {
                    print_ground_truth_report(&validate_with_ground_truth(&fields, &ground_truth))
                }
                None => {
                    let template = FormLanguage::detect(&fields).template();
                    print_dynamic_report(&validate_dynamic(&fields, template));
                }
            }
        }
    }

    Ok(())
}

async fn read_ground_truth(path: &Path) -> Result<Option<Value>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "No ground truth; using dynamic validation");
        return Ok(None);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid ground truth JSON in {}", path.display()))?;
    Ok(Some(normalize_keys(&value)))
}

fn print_ground_truth_report(report: &GroundTruthReport) {
    println!("Accuracy:     {}", percent(report.accuracy));
    println!("Completeness: {}", percent(report.completeness));

    if !report.missing_fields.is_empty() {
        println!("{}", "Missing fields:".yellow());
        for field in &report.missing_fields {
            println!("  - {field}");
        }
    }

    if !report.mismatched_fields.is_empty() {
        println!("{}", "Mismatched fields:".yellow());
        for (field, mismatch) in &report.mismatched_fields {
            println!(
                "  - {field}: expected {}, got {}",
                mismatch.expected, mismatch.actual
            );
        }
    }
}

fn print_dynamic_report(report: &DynamicReport) {
    println!("Completeness: {}", percent(report.completeness));

    if !report.missing_fields.is_empty() {
        println!("{}", "Missing fields:".yellow());
        for field in &report.missing_fields {
            println!("  - {field}");
        }
    }

    if !report.invalid_fields.is_empty() {
        println!("{}", "Invalid fields:".red());
        for (field, reason) in &report.invalid_fields {
            println!("  - {field}: {reason}");
        }
    }
}

fn percent(value: f64) -> colored::ColoredString {
    let text = format!("{value:.2}%");
    if value >= 90.0 {
        text.green()
    } else if value >= 60.0 {
        text.yellow()
    } else {
        text.red()
    }
}
