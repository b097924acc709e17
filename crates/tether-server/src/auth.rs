use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tether_domain::{Authenticator, DomainError, DomainResult};

#[derive(Debug, Deserialize)]
struct IdentityResponse {
    id: String,
}

/// Identity-oracle client against the external users service.
///
/// Every failure mode collapses into `UnauthorizedAccess`; the services
/// additionally bound each call with their own timeout.
pub struct HttpAuthenticator {
    users_url: String,
    http_client: reqwest::Client,
}

impl HttpAuthenticator {
    pub fn new(users_url: String) -> Self {
        Self {
            users_url,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn identify(&self, credential: &str) -> DomainResult<String> {
        let response = self
            .http_client
            .get(format!("{}/identify", self.users_url))
            .header(reqwest::header::AUTHORIZATION, credential)
            .send()
            .await
            .map_err(|err| {
                debug!("identity oracle unreachable: {err}");
                DomainError::UnauthorizedAccess
            })?;

        if !response.status().is_success() {
            return Err(DomainError::UnauthorizedAccess);
        }

        let identity: IdentityResponse = response
            .json()
            .await
            .map_err(|_| DomainError::UnauthorizedAccess)?;

        Ok(identity.id)
    }
}
