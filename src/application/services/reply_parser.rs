use serde_json::Value;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Parses a model reply that should be JSON, optionally wrapped in a ```json fence.
pub fn parse_json_reply(raw: &str) -> Result<Value, ReplyParseError> {
    let raw = raw.trim();
    let block = match raw.split_once(JSON_FENCE) {
        Some((_, rest)) => rest.split(FENCE).next().unwrap_or_default().trim(),
        None => raw,
    };

    if block.is_empty() {
        return Err(ReplyParseError::Empty);
    }

    serde_json::from_str(block).map_err(|e| ReplyParseError::InvalidJson {
        block: block.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyParseError {
    #[error("empty JSON response from model")]
    Empty,
    #[error("invalid JSON response ({reason}): {block}")]
    InvalidJson { block: String, reason: String },
}
