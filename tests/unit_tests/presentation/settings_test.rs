use std::path::Path;

use docsense::presentation::config::{Environment, LlmProvider, Settings};

#[test]
fn given_no_config_files_when_loading_then_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let settings = Settings::load(dir.path(), Environment::Test).unwrap();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.server.workers, 4);
    assert_eq!(settings.server.max_upload_bytes, 50 * 1024 * 1024);
    assert_eq!(settings.ocr.model_id, "prebuilt-document");
    assert_eq!(settings.llm.provider, LlmProvider::Azure);
    assert_eq!(settings.llm.embedding_model, "text-embedding-ada-002");
    assert_eq!(settings.llm.max_tokens, None);
    assert_eq!(settings.knowledge_base.max_tokens, 150);
    assert!((settings.knowledge_base.distance_threshold - 0.3).abs() < 1e-6);
    assert_eq!(
        settings.knowledge_base.path,
        Path::new("knowledge_base_embeddings_chunked.json")
    );
    assert_eq!(settings.frontend.api_url, "http://127.0.0.1:8000");
}

#[test]
fn given_base_and_environment_files_when_loading_then_environment_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("appsettings.toml"),
        "[server]\nport = 9000\nworkers = 2\n\n[llm]\nprovider = \"openai\"\nmax_tokens = 1000\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("appsettings.prod.toml"),
        "[server]\nport = 9100\n",
    )
    .unwrap();

    let settings = Settings::load(dir.path(), Environment::Prod).unwrap();

    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.server.workers, 2);
    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
    assert_eq!(settings.llm.max_tokens, Some(1000));
}

#[test]
fn given_logging_settings_when_building_tracing_config_then_copies_fields() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path(), Environment::Local).unwrap();

    let config = settings.logging.tracing_config(Environment::Local);

    assert_eq!(config.environment, "local");
    assert!(!config.json_format);
    assert_eq!(config.log_file, None);
}
