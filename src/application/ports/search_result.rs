#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub file: String,
    pub chunk_id: String,
    pub content: String,
    pub distance: f32,
}
