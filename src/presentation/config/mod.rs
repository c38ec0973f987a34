mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ExtractionSettings, FrontendSettings, KnowledgeBaseSettings, LlmProvider, LlmSettings,
    LoggingSettings, OcrSettings, ServerSettings, Settings,
};
