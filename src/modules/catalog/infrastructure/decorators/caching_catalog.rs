use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::modules::catalog::domain::{
    entities::{DisaggregatedCharacter, DisaggregatedMedia},
    repositories::RemoteCatalog,
    value_objects::MediaType,
};
use crate::shared::errors::AppResult;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Decorator that remembers remote records by id for a fixed time to live
///
/// Only by-id lookups are cached; a batch still costs at most one inner call,
/// made for the ids that were missing or expired. Text searches always pass through.
pub struct CachingRemoteCatalog {
    inner: Arc<dyn RemoteCatalog>,
    ttl: Duration,
    media: DashMap<String, CacheEntry<DisaggregatedMedia>>,
    characters: DashMap<String, CacheEntry<DisaggregatedCharacter>>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub entries: usize,
}

impl CachingRemoteCatalog {
    pub fn new(inner: Arc<dyn RemoteCatalog>) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(inner: Arc<dyn RemoteCatalog>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            media: DashMap::new(),
            characters: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            entries: self.media.len() + self.characters.len(),
        }
    }

    pub fn clear(&self) {
        self.media.clear();
        self.characters.clear();
    }

    /// Drop every expired entry, returning how many went
    pub fn purge_expired(&self) -> usize {
        let before = self.media.len() + self.characters.len();

        self.media.retain(|_, entry| !entry.is_expired(self.ttl));
        self.characters.retain(|_, entry| !entry.is_expired(self.ttl));

        let purged = before - (self.media.len() + self.characters.len());
        if purged > 0 {
            self.expired.fetch_add(purged as u64, Ordering::Relaxed);
            log::debug!("Cache: Purged {} expired records", purged);
        }
        purged
    }

    /// Ids missing from `cache` or expired there, in request order without repeats
    fn missing<V>(&self, cache: &DashMap<String, CacheEntry<V>>, ids: &[String]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();

        for id in ids {
            let expired = cache.get(id).map(|entry| entry.is_expired(self.ttl));

            let fresh = match expired {
                Some(false) => true,
                Some(true) => {
                    cache.remove(id);
                    self.expired.fetch_add(1, Ordering::Relaxed);
                    false
                }
                None => false,
            };

            if fresh {
                self.hits.fetch_add(1, Ordering::Relaxed);
            } else if !missing.contains(id) {
                self.misses.fetch_add(1, Ordering::Relaxed);
                missing.push(id.clone());
            }
        }

        missing
    }

    fn collect<V: Clone>(cache: &DashMap<String, CacheEntry<V>>, ids: &[String]) -> Vec<V> {
        ids.iter()
            .filter_map(|id| cache.get(id).map(|entry| entry.value.clone()))
            .collect()
    }
}

#[async_trait]
impl RemoteCatalog for CachingRemoteCatalog {
    fn source_id(&self) -> &str {
        self.inner.source_id()
    }

    async fn media_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedMedia>> {
        let missing = self.missing(&self.media, ids);

        if !missing.is_empty() {
            log::debug!("Cache MISS for {} media", missing.len());
            for media in self.inner.media_by_ids(&missing).await? {
                self.media.insert(media.info.id.clone(), CacheEntry::new(media));
            }
        }

        Ok(Self::collect(&self.media, ids))
    }

    async fn characters_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedCharacter>> {
        let missing = self.missing(&self.characters, ids);

        if !missing.is_empty() {
            log::debug!("Cache MISS for {} characters", missing.len());
            for character in self.inner.characters_by_ids(&missing).await? {
                self.characters.insert(character.info.id.clone(), CacheEntry::new(character));
            }
        }

        Ok(Self::collect(&self.characters, ids))
    }

    async fn search_media(
        &self,
        text: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<DisaggregatedMedia>> {
        self.inner.search_media(text, media_type).await
    }

    async fn search_characters(&self, text: &str) -> AppResult<Vec<DisaggregatedCharacter>> {
        self.inner.search_characters(text).await
    }
}
