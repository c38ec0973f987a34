use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::ports::{
    Embedder, FileLoader, FileLoaderError, KnowledgeBaseWriter, KnowledgeStoreError,
    ServiceError, TextSplitter,
};
use crate::domain::{KnowledgeBase, KnowledgeChunk, SourceFile};

pub const EMBED_BATCH_SIZE: usize = 16;

pub struct KnowledgeBaseBuilder<F, W>
where
    F: FileLoader,
    W: KnowledgeBaseWriter,
{
    file_loader: Arc<F>,
    embedder: Arc<dyn Embedder>,
    text_splitter: Arc<dyn TextSplitter>,
    writer: Arc<W>,
}

impl<F, W> KnowledgeBaseBuilder<F, W>
where
    F: FileLoader,
    W: KnowledgeBaseWriter,
{
    pub fn new(
        file_loader: Arc<F>,
        embedder: Arc<dyn Embedder>,
        text_splitter: Arc<dyn TextSplitter>,
        writer: Arc<W>,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            text_splitter,
            writer,
        }
    }

    /// Chunks and embeds every source, then overwrites the persisted knowledge base.
    pub async fn build(&self, sources: &[SourceFile]) -> Result<BuildSummary, BuildError> {
        let mut knowledge_base = KnowledgeBase::new();

        for source in sources {
            let embedded = self.build_source(source).await?;
            knowledge_base.insert(source.document.filename.clone(), embedded);
        }

        self.writer.save(&knowledge_base).await?;

        Ok(BuildSummary {
            chunks_per_file: knowledge_base
                .files
                .iter()
                .map(|(file, chunks)| (file.clone(), chunks.len()))
                .collect(),
            total_chunks: knowledge_base.chunk_count(),
            dimensions: knowledge_base.embedding_dimensions(),
        })
    }

    #[tracing::instrument(skip(self, source), fields(filename = %source.document.filename))]
    async fn build_source(&self, source: &SourceFile) -> Result<Vec<KnowledgeChunk>, BuildError> {
        let text = self
            .file_loader
            .extract_text(&source.data, &source.document)
            .await?;
        let chunks = self.text_splitter.split(&text);
        let embedded = self
            .embed_chunks(&source.document.filename, chunks)
            .await?;

        tracing::info!(chunks = embedded.len(), "Source embedded");
        Ok(embedded)
    }

    async fn embed_chunks(
        &self,
        filename: &str,
        chunks: Vec<String>,
    ) -> Result<Vec<KnowledgeChunk>, BuildError> {
        let mut embedded = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(String::as_str).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;

            if embeddings.len() != batch.len() {
                return Err(BuildError::Embedding(ServiceError::InvalidResponse(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    embeddings.len()
                ))));
            }

            for (content, embedding) in batch.iter().zip(embeddings) {
                let index = embedded.len();
                embedded.push(KnowledgeChunk::new(filename, index, content.clone(), embedding));
            }
        }

        Ok(embedded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub chunks_per_file: BTreeMap<String, usize>,
    pub total_chunks: usize,
    pub dimensions: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("embedding: {0}")]
    Embedding(#[from] ServiceError),
    #[error("storage: {0}")]
    Storage(#[from] KnowledgeStoreError),
}
