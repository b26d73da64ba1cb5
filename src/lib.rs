//! RAG Ingest
//!
//! A document ingestion pipeline for retrieval-augmented generation:
//! - Upload validation and text extraction for text, markdown, JSON and CSV
//! - Configurable chunking (sentence, paragraph, fixed-size) with overlap
//! - Owner-scoped persistence of documents and chunks with rollback on
//!   partial failure

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use infrastructure::auth::StaticSessionProvider;
use infrastructure::services::IngestionService;
use infrastructure::storage::{
    InMemoryBlobStore, InMemoryDocumentRepository, PostgresConfig, PostgresDocumentRepository,
};
use tracing::info;

/// Create an ingestion service wired from configuration.
///
/// Uses the PostgreSQL repository when a database URL is configured,
/// otherwise an in-memory one. Blob storage is in-memory in both cases; a
/// bucket-backed store plugs in through the same trait.
pub async fn create_ingestion_service(
    config: &AppConfig,
    owner: &str,
) -> anyhow::Result<IngestionService> {
    let sessions = Arc::new(StaticSessionProvider::new(owner));
    let blobs = Arc::new(InMemoryBlobStore::new());

    let service = match &config.database.url {
        Some(url) => {
            info!("Using PostgreSQL document storage");
            let repository = PostgresDocumentRepository::connect(&PostgresConfig {
                url: url.clone(),
                max_connections: config.database.max_connections,
                connect_timeout_secs: config.database.connect_timeout_secs,
            })
            .await?;
            repository.ensure_tables().await?;

            IngestionService::new(sessions, blobs, Arc::new(repository))
        }
        None => {
            info!("Using in-memory document storage");
            IngestionService::new(sessions, blobs, Arc::new(InMemoryDocumentRepository::new()))
        }
    };

    Ok(service.with_chunking_config(config.chunking.clone()))
}
