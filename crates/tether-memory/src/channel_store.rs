use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tether_domain::{Channel, ChannelRepository, DomainError, DomainResult, ThingRepository};

use crate::keys::{key, pad_id};

/// In-memory implementation of `ChannelRepository`.
///
/// Holds a thing repository so `connect` can verify the thing endpoint
/// under the same owner before materializing it on the channel.
pub struct InMemoryChannelRepository {
    channels: Arc<RwLock<HashMap<String, Channel>>>,
    things: Arc<dyn ThingRepository>,
}

impl InMemoryChannelRepository {
    pub fn new(things: Arc<dyn ThingRepository>) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            things,
        }
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn save(&self, channel: Channel) -> DomainResult<String> {
        let mut channels = self.channels.write().await;

        let db_key = key(&channel.owner, &channel.id);
        if channels.contains_key(&db_key) {
            return Err(DomainError::Conflict);
        }

        let id = channel.id.clone();
        channels.insert(db_key, channel);
        Ok(id)
    }

    async fn update(&self, mut channel: Channel) -> DomainResult<()> {
        let mut channels = self.channels.write().await;

        let db_key = key(&channel.owner, &channel.id);
        match channels.get_mut(&db_key) {
            Some(existing) => {
                // Connectivity changes only through connect/disconnect.
                channel.connected = existing.connected.clone();
                *existing = channel;
                Ok(())
            }
            None => Err(DomainError::NotFound),
        }
    }

    async fn one(&self, owner: &str, id: &str) -> DomainResult<Channel> {
        let channels = self.channels.read().await;
        channels
            .get(&key(owner, id))
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn all(&self, owner: &str, offset: i64, limit: i64) -> Vec<Channel> {
        let mut page = Vec::new();
        if offset < 0 || limit <= 0 {
            return page;
        }

        // Ids are 1-based, so the half-open window shifts by one.
        let first = pad_id(offset as u64 + 1);
        let last = pad_id(offset as u64 + limit as u64 + 1);
        let prefix = format!("{owner}-");

        let channels = self.channels.read().await;
        for (k, channel) in channels.iter() {
            if k.starts_with(&prefix) && channel.id >= first && channel.id < last {
                page.push(channel.clone());
            }
        }

        page.sort_by(|a, b| a.id.cmp(&b.id));
        page
    }

    async fn remove(&self, owner: &str, id: &str) -> DomainResult<()> {
        let mut channels = self.channels.write().await;
        channels
            .remove(&key(owner, id))
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }

    async fn connect(&self, owner: &str, channel_id: &str, thing_id: &str) -> DomainResult<()> {
        // The write lock is held across the thing lookup so two racing
        // connects cannot lose an insertion.
        let mut channels = self.channels.write().await;
        let channel = channels
            .get_mut(&key(owner, channel_id))
            .ok_or(DomainError::NotFound)?;

        let thing = self.things.one(owner, thing_id).await?;

        if !channel.connected.iter().any(|t| t.id == thing.id) {
            channel.connected.push(thing);
        }
        Ok(())
    }

    async fn disconnect(&self, owner: &str, channel_id: &str, thing_id: &str) -> DomainResult<()> {
        let mut channels = self.channels.write().await;
        let channel = channels
            .get_mut(&key(owner, channel_id))
            .ok_or(DomainError::NotFound)?;

        let before = channel.connected.len();
        channel.connected.retain(|t| t.id != thing_id);
        if channel.connected.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn has_thing(&self, channel_id: &str, device_key: &str) -> DomainResult<String> {
        // The channel is located by key suffix: the data plane knows the
        // channel id but not the owner.
        let suffix = format!("-{channel_id}");

        let channels = self.channels.read().await;
        for (k, channel) in channels.iter() {
            if k.ends_with(&suffix) {
                return channel
                    .connected
                    .iter()
                    .find(|t| t.key == device_key)
                    .map(|t| t.id.clone())
                    .ok_or(DomainError::NotFound);
            }
        }

        Err(DomainError::NotFound)
    }
}
