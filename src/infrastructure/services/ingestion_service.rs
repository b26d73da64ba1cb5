//! Ingestion orchestrator
//!
//! Drives one uploaded file through validation, extraction, blob upload,
//! chunking and persistence, reporting discrete progress stages and rolling
//! back partial state when a later step fails.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::document::{
    ChunkMetadata, ChunkStats, Document, DocumentChunk, NewDocument, NewDocumentChunk,
    SourceMetadata,
};
use crate::domain::ingestion::{
    sanitize_filename, validate_upload, ChunkRecord, ChunkingConfig, UploadedFile,
};
use crate::domain::session::SessionProvider;
use crate::domain::DomainError;
use crate::infrastructure::ingestion::{parser_for, Chunker};
use crate::infrastructure::storage::{BlobStore, DocumentRepository};

/// Discrete stages of one ingestion run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStage {
    Validating,
    Extracting,
    Uploading,
    Chunking,
    Persisting,
    Completed,
    Error,
}

impl fmt::Display for IngestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Extracting => "extracting",
            Self::Uploading => "uploading",
            Self::Chunking => "chunking",
            Self::Persisting => "persisting",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Progress report emitted at each stage transition.
///
/// Observation channel only: consumers cannot cancel or apply backpressure
/// through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Completion estimate, 0-100
    pub percentage: u8,
    /// Stage being entered
    pub stage: IngestionStage,
    /// Human-readable status
    pub message: String,
}

/// Result of a completed ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub document: Document,
    pub chunks: Vec<DocumentChunk>,
}

/// Undo action registered after a pipeline step succeeds.
///
/// The persistence steps are a manually compensated two-step transaction: the
/// underlying store offers no cross-statement transactions to this client, so
/// completed steps are reverted explicitly, in reverse order, when a later
/// step fails.
#[derive(Debug, Clone)]
enum Compensation {
    RemoveBlob(String),
    RemoveDocument { id: Uuid, owner_id: String },
}

/// Orchestrates the ingestion pipeline against its external collaborators
pub struct IngestionService {
    sessions: Arc<dyn SessionProvider>,
    blobs: Arc<dyn BlobStore>,
    repository: Arc<dyn DocumentRepository>,
    chunking: ChunkingConfig,
}

impl fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("chunking", &self.chunking)
            .finish()
    }
}

impl IngestionService {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        blobs: Arc<dyn BlobStore>,
        repository: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            sessions,
            blobs,
            repository,
            chunking: ChunkingConfig::default(),
        }
    }

    /// Override the default chunking configuration
    pub fn with_chunking_config(mut self, config: ChunkingConfig) -> Self {
        self.chunking = config;
        self
    }

    /// Run the full upload-and-process pipeline for one file.
    ///
    /// A document row and its chunk rows are created together or not at all;
    /// on failure every completed step is compensated in reverse before the
    /// error is returned.
    pub async fn upload_and_process(
        &self,
        file: UploadedFile,
        owner_id: &str,
        progress: Option<&UnboundedSender<ProgressEvent>>,
    ) -> Result<IngestionOutcome, DomainError> {
        self.authorize(owner_id).await?;

        let mut undo: Vec<Compensation> = Vec::new();

        match self.run_pipeline(file, owner_id, progress, &mut undo).await {
            Ok(outcome) => {
                info!(
                    document_id = %outcome.document.id,
                    chunks = outcome.chunks.len(),
                    "ingestion completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                self.unwind(undo).await;
                emit(progress, IngestionStage::Error, 100, err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a document, its chunks and its stored blob.
    ///
    /// The blob removal is best-effort; the document row (and, by cascade,
    /// its chunks) is the authoritative deletion.
    pub async fn delete_document(
        &self,
        document_id: Uuid,
        owner_id: &str,
    ) -> Result<(), DomainError> {
        self.authorize(owner_id).await?;

        let document = self
            .repository
            .get_document(document_id, owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Document not found or access denied"))?;

        if let Err(err) = self.blobs.delete(&document.metadata.storage_path).await {
            warn!(%err, path = %document.metadata.storage_path, "failed to delete stored blob");
        }

        let deleted = self.repository.delete_document(document_id, owner_id).await?;

        if !deleted {
            return Err(DomainError::not_found("Document not found or access denied"));
        }

        info!(%document_id, "document deleted");
        Ok(())
    }

    /// List the owner's documents, newest first
    pub async fn list_documents(&self, owner_id: &str) -> Result<Vec<Document>, DomainError> {
        self.authorize(owner_id).await?;
        self.repository.list_documents(owner_id).await
    }

    /// List the owner's chunks, optionally restricted to one document
    pub async fn list_chunks(
        &self,
        owner_id: &str,
        document_id: Option<Uuid>,
    ) -> Result<Vec<DocumentChunk>, DomainError> {
        self.authorize(owner_id).await?;
        self.repository.list_chunks(owner_id, document_id).await
    }

    /// Aggregate chunk statistics for the owner
    pub async fn chunk_stats(&self, owner_id: &str) -> Result<ChunkStats, DomainError> {
        self.authorize(owner_id).await?;

        let documents = self.repository.list_documents(owner_id).await?;
        let chunks = self.repository.list_chunks(owner_id, None).await?;

        let total_documents = documents.len();
        let total_chunks = chunks.len();

        Ok(ChunkStats {
            total_chunks,
            total_documents,
            avg_chunks_per_document: if total_documents > 0 {
                total_chunks as f64 / total_documents as f64
            } else {
                0.0
            },
            total_word_count: chunks.iter().map(|c| c.metadata.word_count).sum(),
        })
    }

    /// Verify the asserted owner against the authenticated session before any
    /// storage access
    async fn authorize(&self, owner_id: &str) -> Result<(), DomainError> {
        let session = self.sessions.session().await?;

        if session.owner_id != owner_id {
            return Err(DomainError::authorization("Owner identity mismatch"));
        }

        Ok(())
    }

    async fn run_pipeline(
        &self,
        file: UploadedFile,
        owner_id: &str,
        progress: Option<&UnboundedSender<ProgressEvent>>,
        undo: &mut Vec<Compensation>,
    ) -> Result<IngestionOutcome, DomainError> {
        emit(progress, IngestionStage::Validating, 5, "Validating file...");
        let media_type = validate_upload(&file)?;

        emit(
            progress,
            IngestionStage::Extracting,
            15,
            "Extracting text content...",
        );
        let parser = parser_for(media_type);
        let text = parser.parse(&file.bytes).await?;

        if text.trim().is_empty() {
            return Err(DomainError::validation("File appears to be empty"));
        }

        emit(progress, IngestionStage::Uploading, 30, "Uploading file...");
        let path = format!(
            "{}/{}_{}",
            owner_id,
            Utc::now().timestamp_millis(),
            sanitize_filename(&file.name)
        );
        let storage_path = self.blobs.put(&path, &file.bytes).await?;
        undo.push(Compensation::RemoveBlob(storage_path.clone()));

        emit(progress, IngestionStage::Chunking, 60, "Chunking document...");
        let records = Chunker::chunk(&text, &self.chunking)?;

        emit(
            progress,
            IngestionStage::Persisting,
            80,
            "Persisting document and chunks...",
        );

        let mime_type = file
            .mime_type
            .clone()
            .unwrap_or_else(|| media_type.mime_types()[0].to_string());

        let document = self
            .repository
            .insert_document(NewDocument {
                owner_id: owner_id.to_string(),
                content: text,
                metadata: SourceMetadata {
                    original_name: file.name.clone(),
                    file_size: file.size(),
                    mime_type,
                    uploaded_at: Utc::now(),
                    storage_path,
                },
            })
            .await?;

        undo.push(Compensation::RemoveDocument {
            id: document.id,
            owner_id: owner_id.to_string(),
        });

        let chunks = if records.is_empty() {
            Vec::new()
        } else {
            let rows = self.build_chunk_rows(&document, &file.name, records);
            self.repository.insert_chunks(rows).await?
        };

        emit(
            progress,
            IngestionStage::Completed,
            100,
            format!("Document processed with {} chunks", chunks.len()),
        );

        Ok(IngestionOutcome { document, chunks })
    }

    fn build_chunk_rows(
        &self,
        document: &Document,
        original_name: &str,
        records: Vec<ChunkRecord>,
    ) -> Vec<NewDocumentChunk> {
        records
            .into_iter()
            .map(|record| NewDocumentChunk {
                document_id: document.id,
                owner_id: document.owner_id.clone(),
                chunk_index: record.index,
                start_offset: record.start_offset,
                end_offset: record.end_offset,
                metadata: ChunkMetadata {
                    chunk_size: record.len(),
                    overlap_size: self.chunking.chunk_overlap,
                    chunking_method: self.chunking.method,
                    word_count: record.word_count,
                    sentence_count: record.sentence_count,
                    parent_document_name: original_name.to_string(),
                    created_at: Utc::now(),
                },
                content: record.content,
            })
            .collect()
    }

    /// Execute registered compensations in reverse order, logging (not
    /// propagating) compensation failures
    async fn unwind(&self, undo: Vec<Compensation>) {
        for action in undo.into_iter().rev() {
            match action {
                Compensation::RemoveDocument { id, owner_id } => {
                    if let Err(err) = self.repository.delete_document(id, &owner_id).await {
                        warn!(%err, document_id = %id, "compensation failed to delete document");
                    }
                }
                Compensation::RemoveBlob(path) => {
                    if let Err(err) = self.blobs.delete(&path).await {
                        warn!(%err, %path, "compensation failed to delete blob");
                    }
                }
            }
        }
    }
}

fn emit(
    progress: Option<&UnboundedSender<ProgressEvent>>,
    stage: IngestionStage,
    percentage: u8,
    message: impl Into<String>,
) {
    if let Some(sender) = progress {
        // Observation only: a dropped receiver must not fail the pipeline
        let _ = sender.send(ProgressEvent {
            percentage,
            stage,
            message: message.into(),
        });
    }
}
