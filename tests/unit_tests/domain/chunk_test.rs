use docsense::domain::{Embedding, KnowledgeBase, KnowledgeChunk};

use crate::helpers::sample_knowledge_base;

#[test]
fn given_file_and_index_when_creating_chunk_then_id_combines_both() {
    let chunk = KnowledgeChunk::new("dental.html", 3, "text".to_string(), Embedding::new(vec![1.0]));
    assert_eq!(chunk.chunk_id, "dental.html_chunk_3");
}

#[test]
fn given_empty_knowledge_base_when_inspecting_then_has_no_dimensions() {
    let kb = KnowledgeBase::new();
    assert!(kb.is_empty());
    assert_eq!(kb.chunk_count(), 0);
    assert_eq!(kb.embedding_dimensions(), None);
}

#[test]
fn given_populated_knowledge_base_when_iterating_then_yields_chunks_in_file_order() {
    let kb = sample_knowledge_base();

    let ids: Vec<(&str, &str)> = kb
        .iter_chunks()
        .map(|(file, chunk)| (file, chunk.chunk_id.as_str()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("dental.html", "dental.html_chunk_0"),
            ("dental.html", "dental.html_chunk_1"),
            ("optometry.html", "optometry.html_chunk_0"),
        ]
    );
    assert_eq!(kb.chunk_count(), 3);
    assert_eq!(kb.embedding_dimensions(), Some(2));
}
