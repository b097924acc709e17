use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::auth::Authenticator;
use crate::channel::Channel;
use crate::error::{DomainError, DomainResult};
use crate::identity::IdentityProvider;
use crate::repository::ChannelRepository;
use crate::validation;

/// Management-plane service for channels, plus the data-plane access check.
///
/// Management operations authenticate the caller through the identity
/// oracle; `can_access` authenticates a device through its key against the
/// store's membership index and never consults the oracle.
pub struct ChannelService {
    authenticator: Arc<dyn Authenticator>,
    repository: Arc<dyn ChannelRepository>,
    ids: Arc<dyn IdentityProvider>,
    auth_timeout: Duration,
}

impl ChannelService {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        repository: Arc<dyn ChannelRepository>,
        ids: Arc<dyn IdentityProvider>,
        auth_timeout: Duration,
    ) -> Self {
        Self {
            authenticator,
            repository,
            ids,
            auth_timeout,
        }
    }

    /// Resolve the caller behind `credential`. An oracle error and an oracle
    /// timeout are indistinguishable from a bad credential.
    async fn authorize(&self, credential: &str) -> DomainResult<String> {
        match timeout(self.auth_timeout, self.authenticator.identify(credential)).await {
            Ok(Ok(owner)) => Ok(owner),
            Ok(Err(_)) | Err(_) => Err(DomainError::UnauthorizedAccess),
        }
    }

    /// Create a new channel under the caller's identity. Any caller-supplied
    /// id, owner, or connected set is discarded.
    #[instrument(skip(self, credential, channel), fields(name = %channel.name))]
    pub async fn create(&self, credential: &str, mut channel: Channel) -> DomainResult<Channel> {
        let owner = self.authorize(credential).await?;
        validation::validate(&channel)?;

        channel.id = self.ids.id();
        channel.owner = owner;
        // Connectivity changes only through connect/disconnect.
        channel.connected.clear();

        debug!(channel_id = %channel.id, "creating channel");

        self.repository.save(channel.clone()).await?;
        Ok(channel)
    }

    /// Update the channel identified by `channel.id`.
    ///
    /// The owner field is re-derived from the current caller on every
    /// update; cross-owner writes fail the store's (owner, id) lookup.
    #[instrument(skip(self, credential, channel), fields(channel_id = %channel.id))]
    pub async fn update(&self, credential: &str, mut channel: Channel) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        validation::validate(&channel)?;

        channel.owner = owner;
        self.repository.update(channel).await
    }

    /// Fetch one of the caller's channels.
    #[instrument(skip(self, credential))]
    pub async fn view(&self, credential: &str, id: &str) -> DomainResult<Channel> {
        let owner = self.authorize(credential).await?;
        self.repository.one(&owner, id).await
    }

    /// List the caller's channels in ascending id order.
    #[instrument(skip(self, credential))]
    pub async fn list(
        &self,
        credential: &str,
        offset: i64,
        limit: i64,
    ) -> DomainResult<Vec<Channel>> {
        let owner = self.authorize(credential).await?;
        let channels = self.repository.all(&owner, offset, limit).await;

        debug!(count = channels.len(), "listed channels");
        Ok(channels)
    }

    /// Remove one of the caller's channels.
    #[instrument(skip(self, credential))]
    pub async fn remove(&self, credential: &str, id: &str) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        self.repository.remove(&owner, id).await
    }

    /// Connect a thing to a channel. Both must be owned by the caller.
    #[instrument(skip(self, credential))]
    pub async fn connect(
        &self,
        credential: &str,
        channel_id: &str,
        thing_id: &str,
    ) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        self.repository.connect(&owner, channel_id, thing_id).await
    }

    /// Disconnect a thing from a channel. Both must be owned by the caller.
    #[instrument(skip(self, credential))]
    pub async fn disconnect(
        &self,
        credential: &str,
        channel_id: &str,
        thing_id: &str,
    ) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        self.repository
            .disconnect(&owner, channel_id, thing_id)
            .await
    }

    /// Data-plane access check: resolve a device key against the channel's
    /// membership index and return the matching thing's id.
    ///
    /// This path never calls the identity oracle; it must stay cheap and
    /// available independently of the management plane.
    #[instrument(skip(self, device_key))]
    pub async fn can_access(&self, channel_id: &str, device_key: &str) -> DomainResult<String> {
        self.repository.has_thing(channel_id, device_key).await
    }
}
