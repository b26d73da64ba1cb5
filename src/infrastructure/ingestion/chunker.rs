//! Chunker: strategy dispatch plus offset annotation

use tracing::error;

use crate::domain::ingestion::helpers::{count_sentences, count_words};
use crate::domain::ingestion::{ChunkRecord, ChunkingConfig};
use crate::domain::DomainError;

use super::factory::strategy_for;

/// Pure text-segmentation engine.
///
/// Splits text with the configured strategy and annotates each chunk with its
/// index, offsets and word/sentence counts. Deterministic for identical
/// inputs; no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker;

impl Chunker {
    /// Chunk `text` according to `config`.
    ///
    /// Offsets track a virtual concatenation of finalized chunks: after each
    /// chunk the cursor advances by `max(1, length - overlap)`, so overlapping
    /// text is not double-counted and offsets stay strictly increasing. An
    /// empty string, or one entirely below the minimum chunk size, yields an
    /// empty sequence.
    pub fn chunk(text: &str, config: &ChunkingConfig) -> Result<Vec<ChunkRecord>, DomainError> {
        config.validate()?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let strategy = strategy_for(config.method);
        let pieces = strategy.split(text, config);

        let mut records: Vec<ChunkRecord> = Vec::with_capacity(pieces.len());
        let mut cursor = 0usize;

        for content in pieces {
            let start_offset = cursor;
            let end_offset = cursor + content.len();

            // Invariant guard: a chunk that cannot carry valid offsets is
            // dropped and segmentation continues. Losing one chunk beats
            // losing the document.
            if end_offset <= start_offset {
                error!(
                    index = records.len(),
                    start_offset, end_offset, "skipping chunk with invalid offsets"
                );
                continue;
            }

            cursor += std::cmp::max(1, content.len().saturating_sub(config.chunk_overlap));

            records.push(ChunkRecord {
                index: records.len(),
                word_count: count_words(&content),
                sentence_count: count_sentences(&content),
                content,
                start_offset,
                end_offset,
            });
        }

        Ok(records)
    }
}
