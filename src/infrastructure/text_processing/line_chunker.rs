use crate::application::ports::TextSplitter;

/// Groups whole lines into chunks of at most `max_tokens` whitespace-separated words.
///
/// A single line longer than the limit becomes its own oversized chunk.
pub struct LineChunker {
    max_tokens: usize,
}

impl LineChunker {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }
}

impl TextSplitter for LineChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut token_count = 0;

        for line in text.split('\n') {
            let line_tokens = line.split_whitespace().count();
            if token_count + line_tokens > self.max_tokens && !current.is_empty() {
                chunks.push(current.join(" "));
                current.clear();
                token_count = 0;
            }
            current.push(line);
            token_count += line_tokens;
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        chunks.retain(|chunk| !chunk.trim().is_empty());
        chunks
    }
}
