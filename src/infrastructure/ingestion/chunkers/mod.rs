//! Chunking strategy implementations

mod fixed_size;
mod paragraph;
mod sentence;

pub use fixed_size::FixedSizeChunker;
pub use paragraph::ParagraphChunker;
pub use sentence::SentenceChunker;

use crate::domain::ingestion::helpers::create_overlap;
use crate::domain::ingestion::ChunkingConfig;

/// How a strategy accumulates its units into chunks
pub(crate) struct Accumulation<'a> {
    /// Separator joining units inside a chunk
    pub separator: &'a str,
    /// Finalize once the buffer reaches this size, keeping the unit that
    /// crossed it. `None` for single-threshold strategies.
    pub target_size: Option<usize>,
    /// Finalize before appending a unit that would cross this size
    pub max_size: usize,
}

/// Shared accumulation loop behind every chunking strategy.
///
/// Units are folded into a running buffer. A unit that would push the buffer
/// past `max_size` finalizes the buffer first; a buffer that reaches
/// `target_size` with the unit included is finalized as-is. Either way the
/// next buffer is seeded with the overlap tail of the finalized chunk. A
/// remainder below the minimum is merged into the last chunk rather than
/// discarded; with no prior chunk it is dropped.
pub(crate) fn accumulate(units: &[&str], config: &ChunkingConfig, acc: &Accumulation) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for unit in units {
        let unit = unit.trim();

        if unit.is_empty() {
            continue;
        }

        let potential = if current.is_empty() {
            unit.to_string()
        } else {
            format!("{}{}{}", current, acc.separator, unit)
        };

        if potential.len() > acc.max_size && !current.is_empty() {
            chunks.push(current.trim().to_string());

            let overlap = create_overlap(&current, config.chunk_overlap);
            current = if overlap.is_empty() {
                unit.to_string()
            } else {
                format!("{}{}{}", overlap, acc.separator, unit)
            };
        } else if acc.target_size.is_some_and(|target| potential.len() >= target) {
            chunks.push(potential.trim().to_string());
            current = create_overlap(&potential, config.chunk_overlap);
        } else {
            current = potential;
        }
    }

    let remainder = current.trim();

    if remainder.len() >= config.min_chunk_size {
        chunks.push(remainder.to_string());
    } else if !remainder.is_empty() {
        if let Some(last) = chunks.last_mut() {
            last.push(' ');
            last.push_str(remainder);
        }
    }

    chunks.retain(|chunk| chunk.len() >= config.min_chunk_size);
    chunks
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
    fn test_accumulate_single_chunk() {
        let units = ["alpha beta", "gamma delta"];
        let cfg = config(100, 10, 5, 200);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        let chunks = accumulate(&units, &cfg, &acc);
        assert_eq!(chunks, vec!["alpha beta gamma delta".to_string()]);
    }

    #[test]
    fn test_accumulate_finalizes_on_target() {
        let units = ["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"];
        let cfg = config(15, 0, 5, 100);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        let chunks = accumulate(&units, &cfg, &acc);
        // First two units reach the target together, the third stands alone
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "aaaaaaaaaa bbbbbbbbbb");
        assert_eq!(chunks[1], "cccccccccc");
    }

    #[test]
    fn test_accumulate_max_size_cuts_before_unit() {
        let units = ["aaaaaaaaaa", "bbbbbbbbbbbbbbbbbbbb"];
        let cfg = config(25, 0, 5, 25);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        let chunks = accumulate(&units, &cfg, &acc);
        // Appending the long unit would cross max, so the buffer is cut first
        assert_eq!(chunks[0], "aaaaaaaaaa");
        assert_eq!(chunks[1], "bbbbbbbbbbbbbbbbbbbb");
    }

    #[test]
    fn test_accumulate_merges_small_remainder_into_last_chunk() {
        let units = ["aaaaaaaaaa", "bbbbbbbbbb", "cc"];
        let cfg = config(15, 0, 5, 100);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        let chunks = accumulate(&units, &cfg, &acc);
        // "cc" is below the minimum, so it is folded into the last chunk
        assert_eq!(chunks, vec!["aaaaaaaaaa bbbbbbbbbb cc".to_string()]);
    }

    #[test]
    fn test_accumulate_drops_sub_minimum_without_prior_chunk() {
        let units = ["tiny"];
        let cfg = config(100, 0, 50, 200);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        assert!(accumulate(&units, &cfg, &acc).is_empty());
    }

    #[test]
    fn test_accumulate_seeds_overlap() {
        let units = ["one two three four five", "six seven eight nine ten"];
        let cfg = config(20, 10, 5, 100);
        let acc = Accumulation {
            separator: " ",
            target_size: Some(cfg.chunk_size),
            max_size: cfg.max_chunk_size,
        };

        let chunks = accumulate(&units, &cfg, &acc);
        assert!(chunks.len() >= 2);
        // The second chunk starts with the word-aligned tail of the first
        let tail = create_overlap(&chunks[0], cfg.chunk_overlap);
        assert!(chunks[1].starts_with(&tail));
    }
}
