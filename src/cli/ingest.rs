//! Ingest command - runs the full upload-and-process pipeline for one file

use std::path::PathBuf;

use clap::Args;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ingestion::UploadedFile;
use crate::infrastructure::logging;

/// Arguments for the ingest command
#[derive(Args, Clone)]
pub struct IngestArgs {
    /// File to ingest
    pub path: PathBuf,

    /// Owner identity the pipeline runs as
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Declared MIME type; detected from the filename when omitted
    #[arg(long)]
    pub mime_type: Option<String>,
}

/// Run the ingest command
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let service = crate::create_ingestion_service(&config, &args.owner).await?;

    let name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());

    let bytes = tokio::fs::read(&args.path).await?;

    let mut file = UploadedFile::new(name, bytes);
    if let Some(mime_type) = args.mime_type {
        file = file.with_mime_type(mime_type);
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<crate::infrastructure::services::ProgressEvent>();
    let reporter = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            info!(
                stage = %event.stage,
                percentage = event.percentage,
                "{}",
                event.message
            );
        }
    });

    let result = service
        .upload_and_process(file, &args.owner, Some(&tx))
        .await;

    drop(tx);
    reporter.await?;

    let outcome = result?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "documentId": outcome.document.id,
            "storagePath": outcome.document.metadata.storage_path,
            "chunks": outcome.chunks.len(),
        }))?
    );

    Ok(())
}
