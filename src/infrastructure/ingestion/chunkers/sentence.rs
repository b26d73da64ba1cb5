//! Sentence-based chunking strategy

use crate::domain::ingestion::helpers::split_sentences;
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy};

use super::{accumulate, Accumulation};

/// Splits text into sentence-like units on terminator boundaries and
/// accumulates them toward the target size. Recommended for retrieval since
/// chunks keep sentence boundaries intact.
#[derive(Debug, Clone, Default)]
pub struct SentenceChunker;

impl SentenceChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for SentenceChunker {
    fn split(&self, content: &str, config: &ChunkingConfig) -> Vec<String> {
        let sentences = split_sentences(content);

        accumulate(
            &sentences,
            config,
            &Accumulation {
                separator: " ",
                target_size: Some(config.chunk_size),
                max_size: config.max_chunk_size,
            },
        )
    }

    fn name(&self) -> &'static str {
        "sentence"
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
        let chunker = SentenceChunker::new();
        let chunks = chunker.split("", &ChunkingConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_content_below_minimum() {
        let chunker = SentenceChunker::new();
        let chunks = chunker.split("Hello.", &ChunkingConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_single_chunk_at_minimum() {
        let chunker = SentenceChunker::new();
        let cfg = config(1000, 200, 10, 2000);

        let chunks = chunker.split("This sentence clears the minimum.", &cfg);
        assert_eq!(chunks, vec!["This sentence clears the minimum.".to_string()]);
    }

    #[test]
    fn test_sentences_accumulate_until_target() {
        let chunker = SentenceChunker::new();
        let cfg = config(60, 0, 5, 200);

        let content = "First sentence here. Second sentence here. Third sentence here. Fourth sentence here.";
        let chunks = chunker.split(content, &cfg);

        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(chunk.ends_with('.'), "chunk should end on a sentence: {chunk}");
        }
    }

    #[test]
    fn test_overlap_carried_between_chunks() {
        let chunker = SentenceChunker::new();
        let cfg = config(50, 15, 5, 200);

        let content = "One short sentence here. Another short sentence there. And a third one follows. Then a fourth arrives.";
        let chunks = chunker.split(content, &cfg);

        assert!(chunks.len() >= 2);

        let first_tail: Vec<&str> = chunks[0].split_whitespace().rev().take(1).collect();
        assert!(
            chunks[1].contains(first_tail[0]),
            "second chunk should repeat the tail of the first"
        );
    }

    #[test]
    fn test_oversized_sentence_forces_cut() {
        let chunker = SentenceChunker::new();
        let cfg = config(40, 0, 5, 40);

        let long = "w".repeat(60);
        let content = format!("Short lead-in. {long}.");
        let chunks = chunker.split(&content, &cfg);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "Short lead-in.");
    }

    #[test]
    fn test_name() {
        assert_eq!(SentenceChunker::new().name(), "sentence");
    }
}
