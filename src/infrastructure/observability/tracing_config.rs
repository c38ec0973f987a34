use std::path::PathBuf;

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
    /// Plain-text copy of the log written alongside the console output.
    pub log_file: Option<PathBuf>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            level: "info,docsense=debug,tower_http=debug".to_string(),
            json_format: false,
            log_file: None,
        }
    }
}
