use docsense::infrastructure::observability::{TracingConfig, init_tracing};

use crate::helpers::temp_path;

// The global subscriber can be installed once per process, so this is the only test that does it.
#[test]
fn given_log_file_when_initializing_tracing_then_creates_file_alongside_console() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = temp_path(&dir, "logs/chatbot.log");
    std::fs::create_dir_all(log_file.parent().unwrap()).unwrap();
    let config = TracingConfig {
        level: "info".to_string(),
        log_file: Some(log_file.clone()),
        ..TracingConfig::default()
    };

    init_tracing(&config, "unit-tests");
    tracing::warn!("written to the log file");

    assert!(log_file.exists());
}
