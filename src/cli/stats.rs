//! Stats command - aggregate chunk statistics for one owner

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Arguments for the stats command
#[derive(Args, Clone)]
pub struct StatsArgs {
    /// Owner identity to report on
    #[arg(long, default_value = "local")]
    pub owner: String,
}

/// Run the stats command
pub async fn run(args: StatsArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let service = crate::create_ingestion_service(&config, &args.owner).await?;
    let stats = service.chunk_stats(&args.owner).await?;

    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
