use async_trait::async_trait;

use crate::error::DomainResult;

/// Contract for the external identity oracle.
///
/// Resolves an opaque management-plane credential into the owning
/// principal's identity. The services invoke it under a fixed timeout and
/// fold every failure mode into `UnauthorizedAccess`, so implementations
/// are free to report errors however they like.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    async fn identify(&self, credential: &str) -> DomainResult<String>;
}
