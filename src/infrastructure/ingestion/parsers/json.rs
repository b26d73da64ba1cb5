//! JSON parser

use async_trait::async_trait;

use crate::domain::DomainError;

use super::DocumentParser;

/// Round-trips JSON through a parse and pretty-print.
///
/// Malformed JSON is tolerated: the raw text is returned unchanged rather
/// than rejecting the upload.
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for JsonParser {
    async fn parse(&self, bytes: &[u8]) -> Result<String, DomainError> {
        let raw = String::from_utf8(bytes.to_vec())
            .map_err(|e| DomainError::validation(format!("File is not valid UTF-8: {}", e)))?;

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| DomainError::internal(format!("Failed to re-serialize JSON: {}", e))),
            Err(_) => Ok(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_valid_json_pretty_prints() {
        let parser = JsonParser::new();
        let text = parser.parse(br#"{"name":"doc","tags":[1,2]}"#).await.unwrap();

        assert!(text.contains("\"name\": \"doc\""));
        assert!(text.lines().count() > 1);
    }

    #[tokio::test]
    async fn test_parse_malformed_json_falls_back_to_raw() {
        let parser = JsonParser::new();
        let raw = r#"{"unterminated": true"#;

        let text = parser.parse(raw.as_bytes()).await.unwrap();
        assert_eq!(text, raw);
    }

    #[tokio::test]
    async fn test_parse_invalid_utf8_rejected() {
        let parser = JsonParser::new();
        assert!(parser.parse(&[0xc3, 0x28]).await.is_err());
    }
}
