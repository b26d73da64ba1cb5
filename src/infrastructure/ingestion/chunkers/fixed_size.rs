//! Fixed-size chunking strategy

use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy};

use super::{accumulate, Accumulation};

/// Accumulates whitespace-delimited words up to the target size, joined by
/// single spaces. Single-threshold variant: the target size is the only
/// cutoff, there is no separate max-size early finalization.
#[derive(Debug, Clone, Default)]
pub struct FixedSizeChunker;

impl FixedSizeChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for FixedSizeChunker {
    fn split(&self, content: &str, config: &ChunkingConfig) -> Vec<String> {
        let words: Vec<&str> = content.split_whitespace().collect();

        accumulate(
            &words,
            config,
            &Accumulation {
                separator: " ",
                target_size: None,
                max_size: config.chunk_size,
            },
        )
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: usize, overlap: usize, min: usize) -> ChunkingConfig {
        ChunkingConfig::new(target, overlap).with_min_chunk_size(min)
    }

    #[test]
    fn test_empty_content() {
        let chunker = FixedSizeChunker::new();
        assert!(chunker.split("", &ChunkingConfig::default()).is_empty());
    }

    #[test]
    fn test_words_fill_to_target() {
        let chunker = FixedSizeChunker::new();
        let cfg = config(20, 0, 3);

        let content = "aaaa bbbb cccc dddd eeee ffff gggg";
        let chunks = chunker.split(content, &cfg);

        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(chunk.len() <= cfg.chunk_size);
        }
    }

    #[test]
    fn test_never_splits_inside_a_word() {
        let chunker = FixedSizeChunker::new();
        let cfg = config(15, 0, 3);

        let content = "alpha beta gamma delta epsilon";
        let chunks = chunker.split(content, &cfg);

        let words: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();

        for word in words {
            assert!(content.contains(word));
        }
    }

    #[test]
    fn test_normalizes_whitespace() {
        let chunker = FixedSizeChunker::new();
        let cfg = config(200, 0, 3);

        let chunks = chunker.split("spaced    out\n\nwords\there", &cfg);
        assert_eq!(chunks, vec!["spaced out words here".to_string()]);
    }

    #[test]
    fn test_overlap_repeats_trailing_words() {
        let chunker = FixedSizeChunker::new();
        let cfg = config(20, 8, 3);

        let content = "one two three four five six seven eight nine";
        let chunks = chunker.split(content, &cfg);

        assert!(chunks.len() >= 2);

        let last_word = chunks[0].split_whitespace().last().unwrap();
        assert!(chunks[1].starts_with(last_word) || chunks[1].contains(last_word));
    }

    #[test]
    fn test_name() {
        assert_eq!(FixedSizeChunker::new().name(), "fixed");
    }
}
