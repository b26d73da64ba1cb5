//! Infrastructure layer - concrete implementations of domain contracts

pub mod auth;
pub mod ingestion;
pub mod logging;
pub mod services;
pub mod storage;
