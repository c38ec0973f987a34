use std::io;
use std::path::Path;

use crate::domain::{ContentType, SourceFile};

/// Reads the knowledge-base sources (HTML and plain text) directly inside `dir`, sorted by name.
///
/// Files of other types and subdirectories are skipped.
pub async fn read_source_dir(dir: &Path) -> io::Result<Vec<SourceFile>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut sources = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }

        let content_type = match ContentType::from_path(&path) {
            Some(ct @ (ContentType::Html | ContentType::Text)) => ct,
            _ => {
                tracing::debug!(path = %path.display(), "Skipping non-source file");
                continue;
            }
        };

        let filename = entry.file_name().to_string_lossy().into_owned();
        let data = tokio::fs::read(&path).await?;
        sources.push(SourceFile::new(filename, content_type, data));
    }

    sources.sort_by(|a, b| a.document.filename.cmp(&b.document.filename));
    Ok(sources)
}
