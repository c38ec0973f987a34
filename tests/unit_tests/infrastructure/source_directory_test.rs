use docsense::domain::ContentType;
use docsense::infrastructure::storage::read_source_dir;

#[tokio::test]
async fn given_mixed_directory_when_reading_sources_then_keeps_html_and_text_sorted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b_dental.html"), "<p>b</p>").unwrap();
    std::fs::write(dir.path().join("a_notes.txt"), "a").unwrap();
    std::fs::write(dir.path().join("scan.pdf"), "%PDF").unwrap();
    std::fs::create_dir(dir.path().join("nested.html")).unwrap();

    let sources = read_source_dir(dir.path()).await.unwrap();

    let names: Vec<&str> = sources
        .iter()
        .map(|s| s.document.filename.as_str())
        .collect();
    assert_eq!(names, vec!["a_notes.txt", "b_dental.html"]);
    assert_eq!(sources[1].document.content_type, ContentType::Html);
    assert_eq!(sources[1].data, b"<p>b</p>");
}

#[tokio::test]
async fn given_missing_directory_when_reading_sources_then_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_source_dir(&dir.path().join("absent")).await.is_err());
}
