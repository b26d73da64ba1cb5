//! Chunking strategy trait and types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Runs of sentence terminators, used for sentence counting
static TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// A sentence-like unit: text up to and including its terminator run
static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));

/// Paragraph delimiter: one or more blank lines
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Chunking method selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingMethod {
    /// Accumulate sentence units (recommended for retrieval)
    #[default]
    Sentence,
    /// Accumulate paragraph units separated by blank lines
    Paragraph,
    /// Accumulate whitespace-delimited words with a single size threshold
    Fixed,
    /// Placeholder that currently behaves exactly like `Sentence`.
    /// TODO: topic-aware boundary detection once an embedding-backed
    /// segmenter is available.
    Semantic,
}

impl ChunkingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
            Self::Fixed => "fixed",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ChunkingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one chunking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Chunking method
    #[serde(default)]
    pub method: ChunkingMethod,
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Trailing context carried into the next chunk, in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Chunks smaller than this are merged into a neighbor or dropped
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: usize,
    /// Hard ceiling that triggers early chunk finalization
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_min_chunk_size() -> usize {
    100
}

fn default_max_chunk_size() -> usize {
    2000
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            method: ChunkingMethod::default(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            min_chunk_size: default_min_chunk_size(),
            max_chunk_size: default_max_chunk_size(),
        }
    }
}

impl ChunkingConfig {
    /// Create a configuration with the given target size and overlap
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            ..Default::default()
        }
    }

    /// Set the chunking method
    pub fn with_method(mut self, method: ChunkingMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the minimum chunk size
    pub fn with_min_chunk_size(mut self, min_size: usize) -> Self {
        self.min_chunk_size = min_size;
        self
    }

    /// Set the maximum chunk size
    pub fn with_max_chunk_size(mut self, max_size: usize) -> Self {
        self.max_chunk_size = max_size;
        self
    }

    /// Validate the configuration
    ///
    /// Invariant: `0 < min_chunk_size <= chunk_size <= max_chunk_size` and
    /// `chunk_overlap < chunk_size`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_chunk_size == 0 {
            return Err(DomainError::validation(
                "min_chunk_size must be greater than 0",
            ));
        }

        if self.min_chunk_size > self.chunk_size {
            return Err(DomainError::validation(
                "min_chunk_size must be less than or equal to chunk_size",
            ));
        }

        if self.chunk_size > self.max_chunk_size {
            return Err(DomainError::validation(
                "chunk_size must be less than or equal to max_chunk_size",
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

/// One produced chunk with its position metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Chunk text
    pub content: String,
    /// 0-based position among chunks of the same document
    pub index: usize,
    /// Start offset into the virtual concatenation of finalized chunks
    pub start_offset: usize,
    /// End offset, exclusive
    pub end_offset: usize,
    /// Whitespace-delimited word count
    pub word_count: usize,
    /// Number of sentence terminator runs
    pub sentence_count: usize,
}

impl ChunkRecord {
    /// Content length in characters
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Trait for chunking strategies
///
/// Strategies split text into ordered chunk contents; offset and count
/// annotation happens in the [`Chunker`](crate::infrastructure::ingestion::Chunker).
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into chunk texts
    fn split(&self, content: &str, config: &ChunkingConfig) -> Vec<String>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

/// Helper functions shared by chunking strategies
pub mod helpers {
    use super::{PARAGRAPH_RE, SENTENCE_RE, TERMINATOR_RE};

    /// Split text into sentence-like units on terminator boundaries.
    ///
    /// Text with no terminator at all comes back as a single unit.
    pub fn split_sentences(text: &str) -> Vec<&str> {
        let units: Vec<&str> = SENTENCE_RE.find_iter(text).map(|m| m.as_str()).collect();

        if units.is_empty() {
            vec![text]
        } else {
            units
        }
    }

    /// Split text into paragraphs on blank-line boundaries
    pub fn split_paragraphs(text: &str) -> Vec<&str> {
        PARAGRAPH_RE
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .collect()
    }

    /// Count whitespace-delimited words
    pub fn count_words(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Count sentence terminator runs
    pub fn count_sentences(text: &str) -> usize {
        TERMINATOR_RE.find_iter(text).count()
    }

    /// Select the overlap tail carried from a finalized chunk into the next.
    ///
    /// Picks the longest word-aligned suffix whose length stays within
    /// `overlap_size`, scanning backward word by word. A single word too long
    /// to fit falls back to a raw character suffix of exactly `overlap_size`
    /// characters.
    pub fn create_overlap(text: &str, overlap_size: usize) -> String {
        if overlap_size == 0 {
            return String::new();
        }

        if text.len() <= overlap_size {
            return text.to_string();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let mut start = None;
        let mut length = 0;

        for (i, word) in words.iter().enumerate().rev() {
            length += word.len() + if length == 0 { 0 } else { 1 };

            if length > overlap_size {
                break;
            }

            start = Some(i);
        }

        match start {
            Some(i) => words[i..].join(" "),
            None => char_suffix(text, overlap_size),
        }
    }

    /// Last `count` characters of `text`, respecting UTF-8 boundaries
    pub fn char_suffix(text: &str, count: usize) -> String {
        let total = text.chars().count();

        if total <= count {
            return text.to_string();
        }

        text.chars().skip(total - count).collect()
    }
}
