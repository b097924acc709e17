use async_trait::async_trait;

use crate::channel::Channel;
use crate::error::DomainResult;
use crate::thing::Thing;

/// Storage contract for things, scoped by owner identity.
/// Infrastructure crates (e.g. tether-memory) implement this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThingRepository: Send + Sync {
    /// Persist a new thing; fails with `Conflict` on identifier collision.
    async fn save(&self, thing: Thing) -> DomainResult<String>;

    /// Replace the thing stored under (owner, id); fails with `NotFound` if
    /// no such pair exists. The stored device key is preserved.
    async fn update(&self, thing: Thing) -> DomainResult<()>;

    /// Fetch a single thing; fails with `NotFound` on a miss.
    async fn one(&self, owner: &str, id: &str) -> DomainResult<Thing>;

    /// List the owner's things in ascending id order. Never errors: invalid
    /// offset/limit or an exhausted window yield an empty page.
    async fn all(&self, owner: &str, offset: i64, limit: i64) -> Vec<Thing>;

    /// Remove the thing under (owner, id); fails with `NotFound` on a miss.
    async fn remove(&self, owner: &str, id: &str) -> DomainResult<()>;
}

/// Storage contract for channels, scoped by owner identity, plus the
/// connectivity relation and the data-plane membership lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Persist a new channel; fails with `Conflict` on identifier collision.
    async fn save(&self, channel: Channel) -> DomainResult<String>;

    /// Replace the channel stored under (owner, id); fails with `NotFound`
    /// if no such pair exists. The stored connected set is preserved.
    async fn update(&self, channel: Channel) -> DomainResult<()>;

    /// Fetch a single channel; fails with `NotFound` on a miss.
    async fn one(&self, owner: &str, id: &str) -> DomainResult<Channel>;

    /// List the owner's channels in ascending id order. Never errors.
    async fn all(&self, owner: &str, offset: i64, limit: i64) -> Vec<Channel>;

    /// Remove the channel under (owner, id); fails with `NotFound` on a miss.
    async fn remove(&self, owner: &str, id: &str) -> DomainResult<()>;

    /// Add a thing to the channel's connected set. Both endpoints must exist
    /// under `owner`; fails with `NotFound` if either is missing. Connecting
    /// an already-connected thing is a no-op success.
    async fn connect(&self, owner: &str, channel_id: &str, thing_id: &str) -> DomainResult<()>;

    /// Remove a thing from the channel's connected set; fails with
    /// `NotFound` if the thing is not currently a member.
    async fn disconnect(&self, owner: &str, channel_id: &str, thing_id: &str) -> DomainResult<()>;

    /// Data-plane membership lookup: resolve a device key against the
    /// channel's connected set and return the matching thing's id. Owner
    /// identity plays no part here.
    async fn has_thing(&self, channel_id: &str, device_key: &str) -> DomainResult<String>;
}
