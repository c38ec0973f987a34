use docsense::application::ports::{KnowledgeStore, KnowledgeStoreError};
use docsense::domain::Embedding;
use docsense::infrastructure::persistence::InMemoryKnowledgeStore;

use crate::helpers::sample_knowledge_base;

#[tokio::test]
async fn given_threshold_when_searching_then_returns_only_close_chunks_ascending() {
    let store = InMemoryKnowledgeStore::new(sample_knowledge_base());

    let results = store
        .search(&Embedding::new(vec![1.0, 0.0]), 0.3)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].file, "dental.html");
    assert!(results[0].distance.abs() < 1e-6);
    assert_eq!(results[1].chunk_id, "optometry.html_chunk_0");
    assert!(results[1].distance > results[0].distance);
}

#[tokio::test]
async fn given_wide_threshold_when_searching_then_includes_distant_chunks() {
    let store = InMemoryKnowledgeStore::new(sample_knowledge_base());

    let results = store
        .search(&Embedding::new(vec![1.0, 0.0]), 2.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[2].chunk_id, "dental.html_chunk_1");
}

#[tokio::test]
async fn given_wrong_dimensions_when_searching_then_returns_search_failed() {
    let store = InMemoryKnowledgeStore::new(sample_knowledge_base());

    let result = store.search(&Embedding::new(vec![1.0, 0.0, 0.0]), 0.3).await;

    assert!(matches!(result, Err(KnowledgeStoreError::SearchFailed(_))));
}

#[tokio::test]
async fn given_store_when_counting_then_returns_all_chunks() {
    let store = InMemoryKnowledgeStore::new(sample_knowledge_base());
    assert_eq!(store.chunk_count().await.unwrap(), 3);
}
