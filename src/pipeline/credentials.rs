//! Credential acquisition for the execution service.
//!
//! The credential strategy varies by deployment environment (managed
//! identity in hosted environments, developer credentials locally), so the
//! client depends on this seam rather than a concrete provider.

use async_trait::async_trait;

/// Boxed error type for credential providers supplied by the host.
pub type CredentialError = Box<dyn std::error::Error + Send + Sync>;

/// Source of bearer tokens for the execution service.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Produce a bearer token valid for the execution service.
    async fn bearer_token(&self) -> Result<String, CredentialError>;
}

/// Credential provider backed by a fixed token.
///
/// Suitable for deployments where an ambient agent refreshes a token out of
/// band, and for tests.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_configured_token() {
        let provider = StaticTokenProvider::new("secret-token");
        assert_eq!(provider.bearer_token().await.unwrap(), "secret-token");
    }
}
