//! Chunk command - splits a local file without persisting anything

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ingestion::{ChunkingConfig, ChunkingMethod};
use crate::infrastructure::ingestion::Chunker;
use crate::infrastructure::logging;

/// Arguments for the chunk command
#[derive(Args, Clone)]
pub struct ChunkArgs {
    /// File to chunk
    pub path: PathBuf,

    /// Chunking method: sentence, paragraph, fixed-size or semantic
    #[arg(long, value_parser = super::parse_method)]
    pub method: Option<ChunkingMethod>,

    /// Target chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap carried between consecutive chunks, in characters
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Minimum retained chunk size in characters
    #[arg(long)]
    pub min_chunk_size: Option<usize>,

    /// Hard ceiling on chunk size in characters
    #[arg(long)]
    pub max_chunk_size: Option<usize>,
}

/// Run the chunk command
pub async fn run(args: ChunkArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let chunking = apply_overrides(config.chunking, &args);

    let text = tokio::fs::read_to_string(&args.path).await?;
    let records = Chunker::chunk(&text, &chunking)?;

    info!(
        path = %args.path.display(),
        chunks = records.len(),
        "chunking complete"
    );

    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}

fn apply_overrides(mut chunking: ChunkingConfig, args: &ChunkArgs) -> ChunkingConfig {
    if let Some(method) = args.method {
        chunking.method = method;
    }
    if let Some(size) = args.chunk_size {
        chunking.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        chunking.chunk_overlap = overlap;
    }
    if let Some(min) = args.min_chunk_size {
        chunking.min_chunk_size = min;
    }
    if let Some(max) = args.max_chunk_size {
        chunking.max_chunk_size = max;
    }
    chunking
}
