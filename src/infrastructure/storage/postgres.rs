//! PostgreSQL document repository with connection pooling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::document::{Document, DocumentChunk, NewDocument, NewDocumentChunk};
use crate::domain::DomainError;

use super::repository::DocumentRepository;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/rag_ingest".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Document repository backed by PostgreSQL
///
/// Owns a `documents` table and a `document_chunks` table with a cascading
/// foreign key, matching the external storage contract.
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentRepository").finish()
    }
}

impl PostgresDocumentRepository {
    /// Create a repository over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool from configuration
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensure the documents and chunks tables exist
    pub async fn ensure_tables(&self) -> Result<(), DomainError> {
        let documents = r#"
            CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                owner_id TEXT NOT NULL,
                content TEXT NOT NULL,
                metadata JSONB NOT NULL,
                embedding REAL[],
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#;

        let chunks = r#"
            CREATE TABLE IF NOT EXISTS document_chunks (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                document_id UUID NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
                owner_id TEXT NOT NULL,
                content TEXT NOT NULL,
                chunk_index BIGINT NOT NULL,
                start_offset BIGINT NOT NULL,
                end_offset BIGINT NOT NULL,
                embedding REAL[],
                metadata JSONB NOT NULL
            )
        "#;

        for ddl in [documents, chunks] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;
        }

        Ok(())
    }

    fn document_from_row(row: &PgRow) -> Result<Document, DomainError> {
        let metadata: serde_json::Value = row
            .try_get("metadata")
            .map_err(|e| DomainError::storage(format!("Failed to read document row: {}", e)))?;

        Ok(Document {
            id: Self::get(row, "id")?,
            owner_id: Self::get(row, "owner_id")?,
            content: Self::get(row, "content")?,
            metadata: serde_json::from_value(metadata)
                .map_err(|e| DomainError::storage(format!("Malformed document metadata: {}", e)))?,
            embedding: Self::get::<Option<Vec<f32>>>(row, "embedding")?,
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn chunk_from_row(row: &PgRow) -> Result<DocumentChunk, DomainError> {
        let metadata: serde_json::Value = row
            .try_get("metadata")
            .map_err(|e| DomainError::storage(format!("Failed to read chunk row: {}", e)))?;

        Ok(DocumentChunk {
            id: Self::get(row, "id")?,
            document_id: Self::get(row, "document_id")?,
            owner_id: Self::get(row, "owner_id")?,
            content: Self::get(row, "content")?,
            chunk_index: Self::get::<i64>(row, "chunk_index")? as usize,
            start_offset: Self::get::<i64>(row, "start_offset")? as usize,
            end_offset: Self::get::<i64>(row, "end_offset")? as usize,
            embedding: Self::get::<Option<Vec<f32>>>(row, "embedding")?,
            metadata: serde_json::from_value(metadata)
                .map_err(|e| DomainError::storage(format!("Malformed chunk metadata: {}", e)))?,
        })
    }

    fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
        row: &'r PgRow,
        column: &str,
    ) -> Result<T, DomainError> {
        row.try_get(column)
            .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn insert_document(&self, document: NewDocument) -> Result<Document, DomainError> {
        let metadata = serde_json::to_value(&document.metadata)
            .map_err(|e| DomainError::storage(format!("Failed to serialize metadata: {}", e)))?;

        let row = sqlx::query(
            r#"
            INSERT INTO documents (owner_id, content, metadata)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, content, metadata, embedding, created_at
            "#,
        )
        .bind(&document.owner_id)
        .bind(&document.content)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert document: {}", e)))?;

        Self::document_from_row(&row)
    }

    async fn insert_chunks(
        &self,
        chunks: Vec<NewDocumentChunk>,
    ) -> Result<Vec<DocumentChunk>, DomainError> {
        let mut inserted = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let metadata = serde_json::to_value(&chunk.metadata).map_err(|e| {
                DomainError::storage(format!("Failed to serialize chunk metadata: {}", e))
            })?;

            let row = sqlx::query(
                r#"
                INSERT INTO document_chunks
                    (document_id, owner_id, content, chunk_index, start_offset, end_offset, metadata)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, document_id, owner_id, content, chunk_index,
                          start_offset, end_offset, embedding, metadata
                "#,
            )
            .bind(chunk.document_id)
            .bind(&chunk.owner_id)
            .bind(&chunk.content)
            .bind(chunk.chunk_index as i64)
            .bind(chunk.start_offset as i64)
            .bind(chunk.end_offset as i64)
            .bind(metadata)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to insert chunk: {}", e)))?;

            inserted.push(Self::chunk_from_row(&row)?);
        }

        Ok(inserted)
    }

    async fn get_document(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, content, metadata, embedding, created_at
            FROM documents
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to fetch document: {}", e)))?;

        row.as_ref().map(Self::document_from_row).transpose()
    }

    async fn delete_document(&self, id: Uuid, owner_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_documents(&self, owner_id: &str) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, content, metadata, embedding, created_at
            FROM documents
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::document_from_row).collect()
    }

    async fn list_chunks(
        &self,
        owner_id: &str,
        document_id: Option<Uuid>,
    ) -> Result<Vec<DocumentChunk>, DomainError> {
        let rows = match document_id {
            Some(document_id) => {
                sqlx::query(
                    r#"
                    SELECT id, document_id, owner_id, content, chunk_index,
                           start_offset, end_offset, embedding, metadata
                    FROM document_chunks
                    WHERE owner_id = $1 AND document_id = $2
                    ORDER BY document_id, chunk_index
                    "#,
                )
                .bind(owner_id)
                .bind(document_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, document_id, owner_id, content, chunk_index,
                           start_offset, end_offset, embedding, metadata
                    FROM document_chunks
                    WHERE owner_id = $1
                    ORDER BY document_id, chunk_index
                    "#,
                )
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list chunks: {}", e)))?;

        rows.iter().map(Self::chunk_from_row).collect()
    }
}
