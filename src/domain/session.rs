//! Authenticated session contract

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity of the authenticated owner
    pub owner_id: String,
}

impl Session {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

/// Provider of the caller's authenticated session.
///
/// Consulted before every sensitive operation; a missing session surfaces as
/// an authorization error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve the current session
    async fn session(&self) -> Result<Session, DomainError>;
}
