mod in_memory_knowledge_store;
mod json_knowledge_base;

pub use in_memory_knowledge_store::InMemoryKnowledgeStore;
pub use json_knowledge_base::JsonKnowledgeBaseFile;
