//! Paragraph-based chunking strategy

use crate::domain::ingestion::helpers::split_paragraphs;
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy};

use super::{accumulate, Accumulation};

/// Splits text on blank lines and accumulates whole paragraphs, joined by a
/// blank line inside each chunk. Suited to documents with clear paragraph
/// structure.
#[derive(Debug, Clone, Default)]
pub struct ParagraphChunker;

impl ParagraphChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for ParagraphChunker {
    fn split(&self, content: &str, config: &ChunkingConfig) -> Vec<String> {
        let paragraphs = split_paragraphs(content);

        accumulate(
            &paragraphs,
            config,
            &Accumulation {
                separator: "\n\n",
                target_size: Some(config.chunk_size),
                max_size: config.max_chunk_size,
            },
        )
    }

    fn name(&self) -> &'static str {
        "paragraph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: usize, overlap: usize, min: usize, max: usize) -> ChunkingConfig {
        ChunkingConfig::new(target, overlap)
            .with_min_chunk_size(min)
            .with_max_chunk_size(max)
    }

    #[test]
    fn test_empty_content() {
        let chunker = ParagraphChunker::new();
        assert!(chunker.split("", &ChunkingConfig::default()).is_empty());
    }

    #[test]
    fn test_paragraphs_joined_by_blank_line() {
        let chunker = ParagraphChunker::new();
        let cfg = config(200, 0, 5, 400);

        let content = "First paragraph text.\n\nSecond paragraph text.";
        let chunks = chunker.split(content, &cfg);

        assert_eq!(
            chunks,
            vec!["First paragraph text.\n\nSecond paragraph text.".to_string()]
        );
    }

    #[test]
    fn test_target_size_splits_paragraphs() {
        let chunker = ParagraphChunker::new();
        let cfg = config(50, 0, 5, 400);

        let content = "Alpha paragraph body goes on for a while here.\n\nBeta paragraph body also goes on for a while.\n\nGamma closes it out.";
        let chunks = chunker.split(content, &cfg);

        assert!(chunks.len() >= 2);
        assert!(chunks[0].starts_with("Alpha"));
    }

    #[test]
    fn test_blank_lines_with_spaces_still_delimit() {
        let chunker = ParagraphChunker::new();
        let cfg = config(400, 0, 5, 800);

        let content = "One paragraph.\n   \nAnother paragraph.";
        let chunks = chunker.split(content, &cfg);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("One paragraph.\n\nAnother paragraph."));
    }

    #[test]
    fn test_name() {
        assert_eq!(ParagraphChunker::new().name(), "paragraph");
    }
}
