//! Session provider implementations

use async_trait::async_trait;

use crate::domain::session::{Session, SessionProvider};
use crate::domain::DomainError;

/// Session provider with a fixed identity.
///
/// Used by the CLI and tests, where the process itself is the authenticated
/// actor. Real deployments plug in the external auth service here.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider {
    owner_id: String,
}

impl StaticSessionProvider {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn session(&self) -> Result<Session, DomainError> {
        Ok(Session::new(self.owner_id.clone()))
    }
}

/// Session provider that always reports no active session
#[derive(Debug, Clone, Default)]
pub struct NoSessionProvider;

#[async_trait]
impl SessionProvider for NoSessionProvider {
    async fn session(&self) -> Result<Session, DomainError> {
        Err(DomainError::authorization("No active session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_session() {
        let provider = StaticSessionProvider::new("alice");
        let session = provider.session().await.unwrap();
        assert_eq!(session.owner_id, "alice");
    }

    #[tokio::test]
    async fn test_no_session() {
        let provider = NoSessionProvider;
        let result = provider.session().await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));
    }
}
