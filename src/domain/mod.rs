//! Domain layer - core entities and contracts

pub mod document;
pub mod error;
pub mod ingestion;
pub mod session;

pub use document::{
    ChunkMetadata, ChunkStats, Document, DocumentChunk, NewDocument, NewDocumentChunk,
    SourceMetadata,
};
pub use error::DomainError;
pub use ingestion::{
    ChunkRecord, ChunkingConfig, ChunkingMethod, ChunkingStrategy, MediaType, UploadedFile,
};
pub use session::{Session, SessionProvider};
