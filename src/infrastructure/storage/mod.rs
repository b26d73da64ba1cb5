//! Storage infrastructure: blob store and document repository

pub mod blob;
pub mod postgres;
pub mod repository;

pub use blob::{BlobStore, InMemoryBlobStore};
pub use postgres::{PostgresConfig, PostgresDocumentRepository};
pub use repository::{DocumentRepository, InMemoryDocumentRepository};
