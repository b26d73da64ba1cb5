//! Application services

pub mod ingestion_service;

pub use ingestion_service::{IngestionOutcome, IngestionService, IngestionStage, ProgressEvent};
