//! Document repository contract and in-memory implementation

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::document::{Document, DocumentChunk, NewDocument, NewDocumentChunk};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Owner-scoped persistence for documents and their chunks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document row, returning it with its assigned identifier
    async fn insert_document(&self, document: NewDocument) -> Result<Document, DomainError>;

    /// Insert chunk rows, returning them with assigned identifiers
    async fn insert_chunks(
        &self,
        chunks: Vec<NewDocumentChunk>,
    ) -> Result<Vec<DocumentChunk>, DomainError>;

    /// Fetch one document, owner-checked
    async fn get_document(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> Result<Option<Document>, DomainError>;

    /// Delete a document and its chunks, owner-checked. Returns whether a
    /// document row was removed.
    async fn delete_document(&self, id: Uuid, owner_id: &str) -> Result<bool, DomainError>;

    /// List an owner's documents, newest first
    async fn list_documents(&self, owner_id: &str) -> Result<Vec<Document>, DomainError>;

    /// List an owner's chunks ordered by (document, chunk index), optionally
    /// restricted to one document
    async fn list_chunks(
        &self,
        owner_id: &str,
        document_id: Option<Uuid>,
    ) -> Result<Vec<DocumentChunk>, DomainError>;
}

/// Thread-safe in-memory document repository
///
/// Useful for testing and development; supports injecting a one-shot chunk
/// insertion failure to exercise rollback paths.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<Uuid, Document>>,
    chunks: RwLock<Vec<DocumentChunk>>,
    chunk_insert_failure: Mutex<Option<String>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `insert_chunks` call fail with the given message
    pub fn fail_next_chunk_insert(&self, message: impl Into<String>) {
        *self.chunk_insert_failure.lock().unwrap() = Some(message.into());
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Number of stored chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.read().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert_document(&self, document: NewDocument) -> Result<Document, DomainError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let stored = Document {
            id: Uuid::new_v4(),
            owner_id: document.owner_id,
            content: document.content,
            metadata: document.metadata,
            embedding: None,
            created_at: Utc::now(),
        };

        documents.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn insert_chunks(
        &self,
        chunks: Vec<NewDocumentChunk>,
    ) -> Result<Vec<DocumentChunk>, DomainError> {
        if let Some(message) = self.chunk_insert_failure.lock().unwrap().take() {
            return Err(DomainError::storage(message));
        }

        let mut stored_chunks = self
            .chunks
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut inserted = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let stored = DocumentChunk {
                id: Uuid::new_v4(),
                document_id: chunk.document_id,
                owner_id: chunk.owner_id,
                content: chunk.content,
                chunk_index: chunk.chunk_index,
                start_offset: chunk.start_offset,
                end_offset: chunk.end_offset,
                embedding: None,
                metadata: chunk.metadata,
            };

            stored_chunks.push(stored.clone());
            inserted.push(stored);
        }

        Ok(inserted)
    }

    async fn get_document(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> Result<Option<Document>, DomainError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(documents
            .get(&id)
            .filter(|d| d.owner_id == owner_id)
            .cloned())
    }

    async fn delete_document(&self, id: Uuid, owner_id: &str) -> Result<bool, DomainError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let owned = documents
            .get(&id)
            .map(|d| d.owner_id == owner_id)
            .unwrap_or(false);

        if !owned {
            return Ok(false);
        }

        documents.remove(&id);

        // Cascade to chunks
        let mut chunks = self
            .chunks
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        chunks.retain(|c| c.document_id != id);
        Ok(true)
    }

    async fn list_documents(&self, owner_id: &str) -> Result<Vec<Document>, DomainError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut owned: Vec<Document> = documents
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn list_chunks(
        &self,
        owner_id: &str,
        document_id: Option<Uuid>,
    ) -> Result<Vec<DocumentChunk>, DomainError> {
        let chunks = self
            .chunks
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut owned: Vec<DocumentChunk> = chunks
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .filter(|c| document_id.is_none_or(|id| c.document_id == id))
            .cloned()
            .collect();

        owned.sort_by(|a, b| {
            a.document_id
                .cmp(&b.document_id)
                .then(a.chunk_index.cmp(&b.chunk_index))
        });

        Ok(owned)
    }
}
