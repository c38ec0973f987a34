use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{KnowledgeBaseWriter, KnowledgeStoreError};
use crate::domain::{Embedding, KnowledgeBase, KnowledgeChunk};

/// On-disk record of one chunk.
#[derive(Debug, Serialize, Deserialize)]
struct ChunkRecord {
    chunk_id: String,
    embedding: Vec<f32>,
    content: String,
}

type KnowledgeBaseRecord = BTreeMap<String, Vec<ChunkRecord>>;

/// Knowledge base persisted as a pretty-printed JSON object keyed by source file name.
pub struct JsonKnowledgeBaseFile {
    path: PathBuf,
}

impl JsonKnowledgeBaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<KnowledgeBase, KnowledgeStoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => KnowledgeStoreError::NotFound(self.path.display().to_string()),
                _ => KnowledgeStoreError::ReadFailed(format!("{}: {e}", self.path.display())),
            })?;

        let record: KnowledgeBaseRecord = serde_json::from_str(&raw)
            .map_err(|e| KnowledgeStoreError::Malformed(format!("{}: {e}", self.path.display())))?;

        let mut knowledge_base = KnowledgeBase::new();
        for (file, chunks) in record {
            let chunks = chunks
                .into_iter()
                .map(|c| KnowledgeChunk {
                    chunk_id: c.chunk_id,
                    content: c.content,
                    embedding: Embedding::new(c.embedding),
                })
                .collect();
            knowledge_base.insert(file, chunks);
        }

        tracing::info!(
            path = %self.path.display(),
            files = knowledge_base.files.len(),
            chunks = knowledge_base.chunk_count(),
            "Knowledge base loaded"
        );
        Ok(knowledge_base)
    }
}

#[async_trait]
impl KnowledgeBaseWriter for JsonKnowledgeBaseFile {
    async fn save(&self, knowledge_base: &KnowledgeBase) -> Result<(), KnowledgeStoreError> {
        let record: KnowledgeBaseRecord = knowledge_base
            .files
            .iter()
            .map(|(file, chunks)| {
                let records = chunks
                    .iter()
                    .map(|c| ChunkRecord {
                        chunk_id: c.chunk_id.clone(),
                        embedding: c.embedding.values.clone(),
                        content: c.content.clone(),
                    })
                    .collect();
                (file.clone(), records)
            })
            .collect();

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| KnowledgeStoreError::WriteFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| KnowledgeStoreError::WriteFailed(format!("{}: {e}", parent.display())))?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| KnowledgeStoreError::WriteFailed(format!("{}: {e}", self.path.display())))?;

        tracing::info!(path = %self.path.display(), chunks = knowledge_base.chunk_count(), "Knowledge base saved");
        Ok(())
    }
}
