use clap::Parser;
use rag_ingest::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chunk(args) => cli::chunk::run(args).await,
        Command::Ingest(args) => cli::ingest::run(args).await,
        Command::Stats(args) => cli::stats::run(args).await,
    }
}
