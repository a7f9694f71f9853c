//! Reference resolution
//!
//! Turns composite ids into disaggregated records, reading pack catalogs for
//! pack ids and batching every remote id of a call into one remote query.

use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::catalog::domain::{
    entities::{DisaggregatedCharacter, DisaggregatedMedia},
    repositories::RemoteCatalog,
};
use crate::modules::packs::{ConflictResolver, PackCatalog, PackRegistry};
use crate::shared::{errors::AppResult, CompositeId};

/// Record kinds the resolver can look up
trait Resolvable: Clone {
    fn local_id(&self) -> &str;
    fn tag_pack(self, pack_id: &str) -> Self;
    fn from_pack(catalog: &PackCatalog, id: &str) -> Option<Self>;
}

impl Resolvable for DisaggregatedMedia {
    fn local_id(&self) -> &str {
        &self.info.id
    }

    fn tag_pack(self, pack_id: &str) -> Self {
        self.with_pack(pack_id)
    }

    fn from_pack(catalog: &PackCatalog, id: &str) -> Option<Self> {
        catalog.media(id)
    }
}

impl Resolvable for DisaggregatedCharacter {
    fn local_id(&self) -> &str {
        &self.info.id
    }

    fn tag_pack(self, pack_id: &str) -> Self {
        self.with_pack(pack_id)
    }

    fn from_pack(catalog: &PackCatalog, id: &str) -> Option<Self> {
        catalog.character(id)
    }
}

enum Lookup {
    Local(Arc<PackCatalog>, String),
    Remote(String),
}

pub struct ReferenceResolver {
    registry: Arc<PackRegistry>,
    conflicts: ConflictResolver,
    remote: Arc<dyn RemoteCatalog>,
}

impl ReferenceResolver {
    pub fn new(registry: Arc<PackRegistry>, remote: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            conflicts: ConflictResolver::new(registry.clone()),
            registry,
            remote,
        }
    }

    pub fn registry(&self) -> &Arc<PackRegistry> {
        &self.registry
    }

    pub fn conflicts(&self) -> &ConflictResolver {
        &self.conflicts
    }

    pub fn remote(&self) -> &Arc<dyn RemoteCatalog> {
        &self.remote
    }

    /// Media for raw ids; a bare id belongs to the remote catalog
    pub async fn media(&self, ids: &[String], guild_id: Option<&str>) -> AppResult<Vec<DisaggregatedMedia>> {
        let ids = ids.iter().map(|id| CompositeId::parse(id)).collect();
        self.resolve_media(ids, guild_id).await
    }

    /// Characters for raw ids; a bare id belongs to the remote catalog
    pub async fn characters(
        &self,
        ids: &[String],
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedCharacter>> {
        let ids = ids.iter().map(|id| CompositeId::parse(id)).collect();
        self.resolve_characters(ids, guild_id).await
    }

    pub async fn resolve_media(
        &self,
        ids: Vec<CompositeId>,
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedMedia>> {
        let remote = self.remote.clone();
        self.resolve(ids, guild_id, |remote_ids| async move {
            remote.media_by_ids(&remote_ids).await
        })
        .await
    }

    pub async fn resolve_characters(
        &self,
        ids: Vec<CompositeId>,
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedCharacter>> {
        let remote = self.remote.clone();
        self.resolve(ids, guild_id, |remote_ids| async move {
            remote.characters_by_ids(&remote_ids).await
        })
        .await
    }

    async fn resolve<T, F, Fut>(
        &self,
        ids: Vec<CompositeId>,
        guild_id: Option<&str>,
        fetch_remote: F,
    ) -> AppResult<Vec<T>>
    where
        T: Resolvable,
        F: FnOnce(Vec<String>) -> Fut,
        Fut: std::future::Future<Output = AppResult<Vec<T>>>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = self.conflicts.retain_enabled(ids, guild_id);

        let remote_source = self.remote.source_id().to_string();
        let mut catalogs: HashMap<String, Option<Arc<PackCatalog>>> = HashMap::new();
        let mut lookups = Vec::with_capacity(ids.len());
        let mut remote_ids: Vec<String> = Vec::new();

        for id in ids {
            if id.source() == remote_source {
                if !remote_ids.iter().any(|known| known == id.local()) {
                    remote_ids.push(id.local().to_string());
                }
                lookups.push(Lookup::Remote(id.local().to_string()));
                continue;
            }

            let catalog = catalogs
                .entry(id.source().to_string())
                .or_insert_with(|| self.registry.catalog(id.source(), guild_id))
                .clone();

            match catalog {
                Some(catalog) => lookups.push(Lookup::Local(catalog, id.local().to_string())),
                None => log::debug!("Resolver: Unknown pack for '{}'", id),
            }
        }

        let mut fetched: HashMap<String, T> = HashMap::new();

        if !remote_ids.is_empty() {
            log::debug!("Resolver: Fetching {} remote ids", remote_ids.len());

            for record in fetch_remote(remote_ids).await? {
                let record = record.tag_pack(&remote_source);
                fetched.insert(record.local_id().to_string(), record);
            }
        }

        Ok(lookups
            .into_iter()
            .filter_map(|lookup| match lookup {
                Lookup::Local(catalog, id) => T::from_pack(&catalog, &id),
                Lookup::Remote(id) => fetched.get(&id).cloned(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::entities::Alias;
    use crate::modules::catalog::testing::FakeRemoteCatalog;
    use crate::modules::packs::{Manifest, ManifestType, PackSection};

    fn pack(id: &str, media: Vec<DisaggregatedMedia>, conflicts: &[&str]) -> Manifest {
        let mut manifest = Manifest::new(id, ManifestType::Manual);
        manifest.media = Some(PackSection {
            entries: media,
            conflicts: conflicts.iter().map(|c| CompositeId::parse(c)).collect(),
        });
        manifest
    }

    fn media(id: &str, title: &str) -> DisaggregatedMedia {
        DisaggregatedMedia::new(id, Alias::english(title))
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[tokio::test]
    async fn test_local_ids_make_no_remote_call() {
        let registry = Arc::new(PackRegistry::empty());
        registry.register(pack("pack-id", vec![media("1", "title")], &[]), None);

        let remote = Arc::new(FakeRemoteCatalog::new());
        let resolver = ReferenceResolver::new(registry, remote.clone());

        let results = resolver.media(&ids(&["pack-id:1"]), None).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].info.pack_id.as_deref(), Some("pack-id"));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_ids_batched_into_one_call() {
        let remote = Arc::new(
            FakeRemoteCatalog::new()
                .with_media(media("1", "one"))
                .with_media(media("2", "two")),
        );
        let resolver = ReferenceResolver::new(Arc::new(PackRegistry::empty()), remote.clone());

        let results = resolver
            .media(&ids(&["2", "anilist:1", "anilist:2", "anilist:3"]), None)
            .await
            .unwrap();

        let order: Vec<&str> = results.iter().map(|m| m.info.id.as_str()).collect();
        assert_eq!(order, vec!["2", "1", "2"]);
        assert!(results
            .iter()
            .all(|m| m.info.pack_id.as_deref() == Some("anilist")));
        assert_eq!(*remote.media_calls.lock().unwrap(), 1);
        assert_eq!(*remote.requested.lock().unwrap(), vec![ids(&["2", "1", "3"])]);
    }

    #[tokio::test]
    async fn test_unknown_pack_is_dropped() {
        let remote = Arc::new(FakeRemoteCatalog::new());
        let resolver = ReferenceResolver::new(Arc::new(PackRegistry::empty()), remote.clone());

        let results = resolver.characters(&ids(&["nowhere:1"]), None).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_disabled_ids_are_dropped() {
        let registry = Arc::new(PackRegistry::empty());
        registry.register(
            pack("pack-id", vec![media("1", "title")], &["anilist:1", "pack-id:1"]),
            None,
        );

        let remote = Arc::new(FakeRemoteCatalog::new().with_media(media("1", "one")));
        let resolver = ReferenceResolver::new(registry, remote.clone());

        let results = resolver.media(&ids(&["anilist:1", "pack-id:1"]), None).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_kind_never_resolves() {
        let registry = Arc::new(PackRegistry::empty());
        registry.register(pack("pack-id", vec![media("1", "title")], &[]), None);

        let resolver = ReferenceResolver::new(registry, Arc::new(FakeRemoteCatalog::new()));

        let results = resolver.characters(&ids(&["pack-id:1"]), None).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let remote = Arc::new(FakeRemoteCatalog::new().failing_media());
        let resolver = ReferenceResolver::new(Arc::new(PackRegistry::empty()), remote);

        assert!(resolver.media(&ids(&["1"]), None).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_request_touches_nothing() {
        let registry = Arc::new(PackRegistry::empty());
        let remote = Arc::new(FakeRemoteCatalog::new());
        let resolver = ReferenceResolver::new(registry.clone(), remote.clone());

        assert!(resolver.media(&[], None).await.unwrap().is_empty());
        assert_eq!(registry.stats().reads, 0);
        assert_eq!(remote.calls(), 0);
    }
}
