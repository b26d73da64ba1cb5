//! Document and chunk entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ingestion::ChunkingMethod;

/// Provenance of an ingested source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    /// Name of the file as uploaded
    pub original_name: String,
    /// File size in bytes
    pub file_size: usize,
    /// Declared or detected MIME type
    pub mime_type: String,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
    /// Path of the raw file in blob storage
    pub storage_path: String,
}

/// One ingested source file's record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by storage on creation
    pub id: Uuid,
    /// Owning user identity
    pub owner_id: String,
    /// Full extracted text
    pub content: String,
    /// Source provenance
    pub metadata: SourceMetadata,
    /// Populated asynchronously by an external workflow, never computed here
    pub embedding: Option<Vec<f32>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Document fields known before storage assigns an identifier
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub owner_id: String,
    pub content: String,
    pub metadata: SourceMetadata,
}

/// Per-chunk metadata persisted alongside the chunk row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Content length in characters
    pub chunk_size: usize,
    /// Overlap carried into the following chunk
    pub overlap_size: usize,
    /// Method that produced the chunk
    pub chunking_method: ChunkingMethod,
    /// Whitespace-delimited word count
    pub word_count: usize,
    /// Number of sentence terminator runs
    pub sentence_count: usize,
    /// Name of the parent document's source file
    pub parent_document_name: String,
    /// Chunk creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One persisted segment of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Identifier assigned by storage on creation
    pub id: Uuid,
    /// Owning document
    pub document_id: Uuid,
    /// Owning user identity, duplicated for owner-scoped queries
    pub owner_id: String,
    /// Chunk text
    pub content: String,
    /// 0-based position among chunks of the same document
    pub chunk_index: usize,
    /// Start offset into the virtual concatenation of finalized chunks
    pub start_offset: usize,
    /// End offset, exclusive
    pub end_offset: usize,
    /// Populated asynchronously by an external workflow
    pub embedding: Option<Vec<f32>>,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// Chunk fields known before storage assigns an identifier
#[derive(Debug, Clone)]
pub struct NewDocumentChunk {
    pub document_id: Uuid,
    pub owner_id: String,
    pub content: String,
    pub chunk_index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub metadata: ChunkMetadata,
}

/// Owner-level chunk statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStats {
    pub total_chunks: usize,
    pub total_documents: usize,
    pub avg_chunks_per_document: f64,
    pub total_word_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ChunkMetadata {
        ChunkMetadata {
            chunk_size: 11,
            overlap_size: 200,
            chunking_method: ChunkingMethod::Sentence,
            word_count: 2,
            sentence_count: 1,
            parent_document_name: "notes.txt".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_chunk_metadata_serializes_camel_case() {
        let json = serde_json::to_value(metadata()).unwrap();

        assert_eq!(json["chunkSize"], 11);
        assert_eq!(json["chunkingMethod"], "sentence");
        assert_eq!(json["wordCount"], 2);
        assert_eq!(json["sentenceCount"], 1);
        assert_eq!(json["parentDocumentName"], "notes.txt");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_chunk_metadata_round_trip() {
        let meta = metadata();
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: ChunkMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }
}
