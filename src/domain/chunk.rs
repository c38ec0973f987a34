use std::collections::BTreeMap;

use super::Embedding;

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeChunk {
    pub chunk_id: String,
    pub content: String,
    pub embedding: Embedding,
}

impl KnowledgeChunk {
    pub fn new(file_name: &str, index: usize, content: String, embedding: Embedding) -> Self {
        Self {
            chunk_id: format!("{file_name}_chunk_{index}"),
            content,
            embedding,
        }
    }
}

/// Chunks grouped by the source file they were cut from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    pub files: BTreeMap<String, Vec<KnowledgeChunk>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: String, chunks: Vec<KnowledgeChunk>) {
        self.files.insert(file_name, chunks);
    }

    pub fn chunk_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_count() == 0
    }

    pub fn iter_chunks(&self) -> impl Iterator<Item = (&str, &KnowledgeChunk)> {
        self.files
            .iter()
            .flat_map(|(file, chunks)| chunks.iter().map(move |c| (file.as_str(), c)))
    }

    /// Dimensionality shared by the stored embeddings, `None` when empty.
    pub fn embedding_dimensions(&self) -> Option<usize> {
        self.iter_chunks()
            .next()
            .map(|(_, chunk)| chunk.embedding.dimensions())
    }
}
