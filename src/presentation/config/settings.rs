use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::infrastructure::observability::TracingConfig;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub ocr: OcrSettings,
    pub llm: LlmSettings,
    pub knowledge_base: KnowledgeBaseSettings,
    pub logging: LoggingSettings,
    pub extraction: ExtractionSettings,
    pub frontend: FrontendSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Largest document body accepted by the upload routes.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model_id: String,
    pub api_version: String,
    pub poll_interval_ms: u64,
    pub poll_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Azure,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseSettings {
    pub path: PathBuf,
    pub data_dir: PathBuf,
    pub max_tokens: usize,
    pub distance_threshold: f32,
    pub max_matches: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            level: self.level.clone(),
            json_format: self.enable_json,
            log_file: self.file.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub ground_truth_dir: PathBuf,
    pub output_dir: PathBuf,
    pub few_shot_ocr_path: Option<PathBuf>,
    pub few_shot_json_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendSettings {
    pub api_url: String,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.toml`, `appsettings.{environment}.toml`
    /// and `APP__SECTION__KEY` environment variables, in that order.
    pub fn load(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let base = config_dir.join("appsettings.toml");
        let overlay = config_dir.join(format!("appsettings.{}.toml", environment.as_str()));

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.workers", 4)?
            .set_default("server.max_upload_bytes", 50 * 1024 * 1024)?
            .set_default("ocr.endpoint", "")?
            .set_default("ocr.api_key", "")?
            .set_default("ocr.model_id", "prebuilt-document")?
            .set_default("ocr.api_version", "2023-07-31")?
            .set_default("ocr.poll_interval_ms", 1000)?
            .set_default("ocr.poll_timeout_secs", 120)?
            .set_default("ocr.request_timeout_secs", 60)?
            .set_default("llm.provider", "azure")?
            .set_default("llm.endpoint", "")?
            .set_default("llm.api_key", "")?
            .set_default("llm.api_version", "2023-07-01-preview")?
            .set_default("llm.chat_model", "gpt-4o")?
            .set_default("llm.embedding_model", "text-embedding-ada-002")?
            .set_default("llm.request_timeout_secs", 60)?
            .set_default(
                "knowledge_base.path",
                "knowledge_base_embeddings_chunked.json",
            )?
            .set_default("knowledge_base.data_dir", "./data")?
            .set_default("knowledge_base.max_tokens", 150)?
            .set_default("knowledge_base.distance_threshold", 0.3)?
            .set_default("logging.level", "info,docsense=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .set_default("extraction.ground_truth_dir", "gt")?
            .set_default("extraction.output_dir", ".")?
            .set_default("frontend.api_url", "http://127.0.0.1:8000")?
            .add_source(File::from(base).required(false))
            .add_source(File::from(overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
