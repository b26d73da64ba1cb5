//! Strategy selection for chunking methods

use crate::domain::ingestion::{ChunkingMethod, ChunkingStrategy};

use super::chunkers::{FixedSizeChunker, ParagraphChunker, SentenceChunker};

/// Resolve the strategy implementing a chunking method
pub fn strategy_for(method: ChunkingMethod) -> Box<dyn ChunkingStrategy> {
    match method {
        ChunkingMethod::Sentence => Box::new(SentenceChunker::new()),
        ChunkingMethod::Paragraph => Box::new(ParagraphChunker::new()),
        ChunkingMethod::Fixed => Box::new(FixedSizeChunker::new()),
        // TODO: replace with a topic-aware segmenter; until then semantic
        // deliberately shares the sentence strategy
        ChunkingMethod::Semantic => Box::new(SentenceChunker::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(strategy_for(ChunkingMethod::Sentence).name(), "sentence");
        assert_eq!(strategy_for(ChunkingMethod::Paragraph).name(), "paragraph");
        assert_eq!(strategy_for(ChunkingMethod::Fixed).name(), "fixed");
    }

    #[test]
    fn test_semantic_aliases_sentence() {
        assert_eq!(strategy_for(ChunkingMethod::Semantic).name(), "sentence");
    }
}
