//! CLI module for the ingestion pipeline
//!
//! Provides subcommands for exercising the pipeline from the shell:
//! - `chunk`: split a local file and print the chunk records
//! - `ingest`: run the full upload-and-process pipeline
//! - `stats`: report aggregate chunk statistics for an owner

pub mod chunk;
pub mod ingest;
pub mod stats;

use clap::{Parser, Subcommand};

use crate::domain::ingestion::ChunkingMethod;

/// RAG Ingest - document chunking and ingestion pipeline
#[derive(Parser)]
#[command(name = "rag-ingest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Chunk a local file and print the records as JSON
    Chunk(chunk::ChunkArgs),

    /// Ingest a local file through the full pipeline
    Ingest(ingest::IngestArgs),

    /// Print aggregate chunk statistics for an owner
    Stats(stats::StatsArgs),
}

pub(crate) fn parse_method(value: &str) -> Result<ChunkingMethod, String> {
    match value {
        "sentence" => Ok(ChunkingMethod::Sentence),
        "paragraph" => Ok(ChunkingMethod::Paragraph),
        "fixed" | "fixed-size" | "fixed_size" => Ok(ChunkingMethod::Fixed),
        "semantic" => Ok(ChunkingMethod::Semantic),
        other => Err(format!(
            "unknown chunking method '{}' (expected sentence, paragraph, fixed or semantic)",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("sentence").unwrap(), ChunkingMethod::Sentence);
        assert_eq!(parse_method("fixed-size").unwrap(), ChunkingMethod::Fixed);
        assert!(parse_method("recursive").is_err());
    }
}
