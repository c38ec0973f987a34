pub trait TextSplitter: Send + Sync {
    /// Splits raw text into chunk contents, dropping empty chunks.
    fn split(&self, text: &str) -> Vec<String>;
}
