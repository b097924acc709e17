use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tether_domain::{DomainError, DomainResult, Thing, ThingRepository};

use crate::keys::{key, pad_id};

/// In-memory implementation of `ThingRepository`.
///
/// A single map keyed by `owner-id` behind one lock: writers are serialized,
/// readers see a consistent snapshot.
pub struct InMemoryThingRepository {
    things: Arc<RwLock<HashMap<String, Thing>>>,
}

impl InMemoryThingRepository {
    pub fn new() -> Self {
        Self {
            things: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryThingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThingRepository for InMemoryThingRepository {
    async fn save(&self, thing: Thing) -> DomainResult<String> {
        let mut things = self.things.write().await;

        let db_key = key(&thing.owner, &thing.id);
        if things.contains_key(&db_key) {
            return Err(DomainError::Conflict);
        }

        let id = thing.id.clone();
        things.insert(db_key, thing);
        Ok(id)
    }

    async fn update(&self, mut thing: Thing) -> DomainResult<()> {
        let mut things = self.things.write().await;

        let db_key = key(&thing.owner, &thing.id);
        match things.get_mut(&db_key) {
            Some(existing) => {
                // Device keys are immutable after creation.
                thing.key = existing.key.clone();
                *existing = thing;
                Ok(())
            }
            None => Err(DomainError::NotFound),
        }
    }

    async fn one(&self, owner: &str, id: &str) -> DomainResult<Thing> {
        let things = self.things.read().await;
        things
            .get(&key(owner, id))
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn all(&self, owner: &str, offset: i64, limit: i64) -> Vec<Thing> {
        let mut page = Vec::new();
        if offset < 0 || limit <= 0 {
            return page;
        }

        // Ids are 1-based, so the half-open window shifts by one.
        let first = pad_id(offset as u64 + 1);
        let last = pad_id(offset as u64 + limit as u64 + 1);
        let prefix = format!("{owner}-");

        let things = self.things.read().await;
        for (k, thing) in things.iter() {
            if k.starts_with(&prefix) && thing.id >= first && thing.id < last {
                page.push(thing.clone());
            }
        }

        page.sort_by(|a, b| a.id.cmp(&b.id));
        page
    }

    async fn remove(&self, owner: &str, id: &str) -> DomainResult<()> {
        let mut things = self.things.write().await;
        things
            .remove(&key(owner, id))
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SequentialIdProvider;
    use tether_domain::IdentityProvider;

    fn thing(owner: &str, id: &str) -> Thing {
        Thing {
            id: id.to_string(),
            owner: owner.to_string(),
            key: format!("key-{id}"),
            name: format!("thing {id}"),
            metadata: None,
        }
    }

    async fn seed(repo: &InMemoryThingRepository, owner: &str, count: usize) -> Vec<String> {
        let ids = SequentialIdProvider::new();
        let mut created = Vec::new();
        for _ in 0..count {
            let id = ids.id();
            repo.save(thing(owner, &id)).await.unwrap();
            created.push(id);
        }
        created
    }

    #[tokio::test]
    async fn test_save_then_one() {
        let repo = InMemoryThingRepository::new();
        repo.save(thing("alice", "000000000001")).await.unwrap();

        let found = repo.one("alice", "000000000001").await.unwrap();
        assert_eq!(found.name, "thing 000000000001");
    }

    #[tokio::test]
    async fn test_save_duplicate_id_is_conflict() {
        let repo = InMemoryThingRepository::new();
        repo.save(thing("alice", "000000000001")).await.unwrap();

        let result = repo.save(thing("alice", "000000000001")).await;
        assert!(matches!(result, Err(DomainError::Conflict)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryThingRepository::new();

        let result = repo.update(thing("alice", "000000000001")).await;
        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_preserves_device_key() {
        let repo = InMemoryThingRepository::new();
        repo.save(thing("alice", "000000000001")).await.unwrap();

        let mut updated = thing("alice", "000000000001");
        updated.name = "renamed".to_string();
        updated.key = "rotated-key".to_string();
        repo.update(updated).await.unwrap();

        let found = repo.one("alice", "000000000001").await.unwrap();
        assert_eq!(found.name, "renamed");
        assert_eq!(found.key, "key-000000000001");
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let repo = InMemoryThingRepository::new();

        let result = repo.remove("alice", "000000000001").await;
        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_remove_then_one_is_not_found() {
        let repo = InMemoryThingRepository::new();
        repo.save(thing("alice", "000000000001")).await.unwrap();

        repo.remove("alice", "000000000001").await.unwrap();

        let result = repo.one("alice", "000000000001").await;
        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_all_returns_window_in_ascending_order() {
        let repo = InMemoryThingRepository::new();
        let ids = seed(&repo, "alice", 10).await;

        let page = repo.all("alice", 0, 5).await;
        assert_eq!(page.len(), 5);
        let page_ids: Vec<_> = page.iter().map(|t| t.id.clone()).collect();
        assert_eq!(page_ids, ids[0..5]);

        let page = repo.all("alice", 5, 5).await;
        let page_ids: Vec<_> = page.iter().map(|t| t.id.clone()).collect();
        assert_eq!(page_ids, ids[5..10]);
    }

    #[tokio::test]
    async fn test_all_partial_last_page() {
        let repo = InMemoryThingRepository::new();
        seed(&repo, "alice", 7).await;

        let page = repo.all("alice", 5, 5).await;
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_all_invalid_window_is_empty() {
        let repo = InMemoryThingRepository::new();
        seed(&repo, "alice", 3).await;

        assert!(repo.all("alice", -1, 5).await.is_empty());
        assert!(repo.all("alice", 0, 0).await.is_empty());
        assert!(repo.all("alice", 0, -4).await.is_empty());
        assert!(repo.all("alice", 10, 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_owners_are_isolated_even_with_colliding_ids() {
        let repo = InMemoryThingRepository::new();
        repo.save(thing("alice", "000000000001")).await.unwrap();
        repo.save(thing("bob", "000000000001")).await.unwrap();

        let page = repo.all("alice", 0, 10).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].owner, "alice");

        let result = repo.one("bob", "000000000002").await;
        assert!(matches!(result, Err(DomainError::NotFound)));
    }
}
