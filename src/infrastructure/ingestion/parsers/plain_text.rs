//! Plain text parser

use async_trait::async_trait;

use crate::domain::DomainError;

use super::DocumentParser;

/// Decodes bytes as UTF-8 and returns them unchanged
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    async fn parse(&self, bytes: &[u8]) -> Result<String, DomainError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DomainError::validation(format!("File is not valid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_utf8() {
        let parser = PlainTextParser::new();
        let text = parser.parse("héllo wörld".as_bytes()).await.unwrap();
        assert_eq!(text, "héllo wörld");
    }

    #[tokio::test]
    async fn test_parse_invalid_utf8() {
        let parser = PlainTextParser::new();
        let result = parser.parse(&[0xff, 0xfe]).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
