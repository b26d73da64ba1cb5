//! Text extraction from uploaded bytes

mod json;
mod plain_text;

pub use json::JsonParser;
pub use plain_text::PlainTextParser;

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::ingestion::MediaType;
use crate::domain::DomainError;

/// Trait for extracting text from raw document bytes
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// Extract text content from the raw bytes
    async fn parse(&self, bytes: &[u8]) -> Result<String, DomainError>;
}

/// Resolve the parser for a media type.
///
/// Markdown and CSV are ingested verbatim as text; structural parsing adds
/// nothing for chunking.
pub fn parser_for(media_type: MediaType) -> Box<dyn DocumentParser> {
    match media_type {
        MediaType::PlainText | MediaType::Markdown | MediaType::Csv => {
            Box::new(PlainTextParser::new())
        }
        MediaType::Json => Box::new(JsonParser::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parser_for_markdown_is_passthrough() {
        let parser = parser_for(MediaType::Markdown);
        let text = parser.parse(b"# Title\n\nBody.").await.unwrap();
        assert_eq!(text, "# Title\n\nBody.");
    }

    #[tokio::test]
    async fn test_parser_for_json_pretty_prints() {
        let parser = parser_for(MediaType::Json);
        let text = parser.parse(br#"{"a":1}"#).await.unwrap();
        assert!(text.contains("\"a\": 1"));
    }
}
