//! Ingestion infrastructure: chunking strategies, text extraction and the
//! annotating chunker

pub mod chunker;
pub mod chunkers;
pub mod factory;
pub mod parsers;

pub use chunker::Chunker;
pub use chunkers::{FixedSizeChunker, ParagraphChunker, SentenceChunker};
pub use factory::strategy_for;
pub use parsers::{parser_for, DocumentParser, JsonParser, PlainTextParser};
