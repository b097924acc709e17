use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::auth::Authenticator;
use crate::error::{DomainError, DomainResult};
use crate::identity::IdentityProvider;
use crate::repository::ThingRepository;
use crate::thing::Thing;
use crate::validation;

/// Management-plane service for things.
///
/// Every operation resolves the caller's identity through the authenticator
/// before touching the store, and every store call is scoped by the resolved
/// owner.
pub struct ThingService {
    authenticator: Arc<dyn Authenticator>,
    repository: Arc<dyn ThingRepository>,
    ids: Arc<dyn IdentityProvider>,
    keys: Arc<dyn IdentityProvider>,
    auth_timeout: Duration,
}

impl ThingService {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        repository: Arc<dyn ThingRepository>,
        ids: Arc<dyn IdentityProvider>,
        keys: Arc<dyn IdentityProvider>,
        auth_timeout: Duration,
    ) -> Self {
        Self {
            authenticator,
            repository,
            ids,
            keys,
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

    /// Register a new thing under the caller's identity. Any caller-supplied
    /// id, owner, or device key is discarded.
    #[instrument(skip(self, credential, thing), fields(name = %thing.name))]
    pub async fn add(&self, credential: &str, mut thing: Thing) -> DomainResult<Thing> {
        let owner = self.authorize(credential).await?;
        validation::validate(&thing)?;

        thing.id = self.ids.id();
        thing.owner = owner;
        thing.key = self.keys.id();

        debug!(thing_id = %thing.id, "adding thing");

        self.repository.save(thing.clone()).await?;
        Ok(thing)
    }

    /// Update the thing identified by `thing.id`.
    ///
    /// The owner field is re-derived from the current caller on every
    /// update; a forged owner in the payload never survives. Cross-owner
    /// writes fail the store's (owner, id) lookup.
    #[instrument(skip(self, credential, thing), fields(thing_id = %thing.id))]
    pub async fn update(&self, credential: &str, mut thing: Thing) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        validation::validate(&thing)?;

        thing.owner = owner;
        self.repository.update(thing).await
    }

    /// Fetch one of the caller's things.
    #[instrument(skip(self, credential))]
    pub async fn view(&self, credential: &str, id: &str) -> DomainResult<Thing> {
        let owner = self.authorize(credential).await?;
        self.repository.one(&owner, id).await
    }

    /// List the caller's things in ascending id order.
    #[instrument(skip(self, credential))]
    pub async fn list(&self, credential: &str, offset: i64, limit: i64) -> DomainResult<Vec<Thing>> {
        let owner = self.authorize(credential).await?;
        let things = self.repository.all(&owner, offset, limit).await;

        debug!(count = things.len(), "listed things");
        Ok(things)
    }

    /// Remove one of the caller's things.
    #[instrument(skip(self, credential))]
    pub async fn remove(&self, credential: &str, id: &str) -> DomainResult<()> {
        let owner = self.authorize(credential).await?;
        self.repository.remove(&owner, id).await
    }
}
