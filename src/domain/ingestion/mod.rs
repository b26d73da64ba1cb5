//! Ingestion domain types: chunking configuration, chunk records and upload
//! validation

pub mod chunker;
pub mod validation;

pub use chunker::{
    helpers, ChunkRecord, ChunkingConfig, ChunkingMethod, ChunkingStrategy,
};
pub use validation::{
    sanitize_filename, validate_upload, MediaType, UploadedFile, MAX_FILE_SIZE,
};
