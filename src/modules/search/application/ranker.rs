//! Search ranking
//!
//! Candidates come from one remote text query followed by the local entries of
//! the guild's packs. Each scores its best alias match; near-equal scores tie
//! and fall back to popularity, then candidate order.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::modules::catalog::domain::{
    entities::{Alias, DisaggregatedCharacter, DisaggregatedMedia},
    value_objects::MediaType,
};
use crate::modules::catalog::ReferenceResolver;
use crate::modules::search::domain::{JaroWinklerStrategy, SearchConfig, SimilarityStrategy};
use crate::shared::{errors::AppResult, utils::logger::LogContext, CompositeId};

/// Ordered non-empty subset of `[english, romaji, native]`
pub fn alias_to_array(alias: &Alias) -> Vec<String> {
    alias.to_array()
}

struct Scored<T> {
    candidate: T,
    bucket: u32,
    popularity: u32,
    index: usize,
}

pub struct SearchRanker {
    resolver: Arc<ReferenceResolver>,
    strategy: Box<dyn SimilarityStrategy>,
    config: SearchConfig,
}

impl SearchRanker {
    pub fn new(resolver: Arc<ReferenceResolver>, config: SearchConfig) -> Self {
        Self::with_strategy(resolver, config, Box::new(JaroWinklerStrategy))
    }

    pub fn with_strategy(
        resolver: Arc<ReferenceResolver>,
        config: SearchConfig,
        strategy: Box<dyn SimilarityStrategy>,
    ) -> Self {
        Self {
            resolver,
            strategy,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub async fn media_by_ids(&self, ids: &[String], guild_id: Option<&str>) -> AppResult<Vec<DisaggregatedMedia>> {
        self.resolver.media(ids, guild_id).await
    }

    pub async fn characters_by_ids(
        &self,
        ids: &[String],
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedCharacter>> {
        self.resolver.characters(ids, guild_id).await
    }

    pub async fn search_media(
        &self,
        text: &str,
        media_type: Option<MediaType>,
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedMedia>> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        LogContext::search_operation(query, Some("media"), None);

        let source = self.resolver.remote().source_id().to_string();

        let mut candidates: Vec<DisaggregatedMedia> = self
            .resolver
            .remote()
            .search_media(query, media_type)
            .await?
            .into_iter()
            .map(|media| media.with_pack(source.as_str()))
            .collect();

        for catalog in self.resolver.registry().catalogs(guild_id) {
            candidates.extend(
                catalog
                    .all_media()
                    .filter(|media| media_type.is_none() || media.info.media_type == media_type),
            );
        }

        let results = self.rank(
            query,
            candidates,
            |media| &media.info.title,
            |media| media.info.popularity,
            |media| media.info.composite_id(),
            guild_id,
        );

        LogContext::search_operation(query, Some("media"), Some(results.len()));
        Ok(results)
    }

    pub async fn search_characters(
        &self,
        text: &str,
        guild_id: Option<&str>,
    ) -> AppResult<Vec<DisaggregatedCharacter>> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        LogContext::search_operation(query, Some("characters"), None);

        let source = self.resolver.remote().source_id().to_string();

        let mut candidates: Vec<DisaggregatedCharacter> = self
            .resolver
            .remote()
            .search_characters(query)
            .await?
            .into_iter()
            .map(|character| character.with_pack(source.as_str()))
            .collect();

        for catalog in self.resolver.registry().catalogs(guild_id) {
            candidates.extend(catalog.all_characters());
        }

        let results = self.rank(
            query,
            candidates,
            |character| &character.info.name,
            |character| character.info.popularity,
            |character| character.info.composite_id(),
            guild_id,
        );

        LogContext::search_operation(query, Some("characters"), Some(results.len()));
        Ok(results)
    }

    /// Best similarity between the query and any searchable name
    fn score(&self, query: &str, alias: &Alias) -> f64 {
        alias
            .searchable()
            .iter()
            .map(|name| self.strategy.calculate(query, &name.to_lowercase()))
            .fold(0.0, f64::max)
    }

    fn rank<T>(
        &self,
        query: &str,
        candidates: Vec<T>,
        alias: impl Fn(&T) -> &Alias,
        popularity: impl Fn(&T) -> Option<u32>,
        composite_id: impl Fn(&T) -> Option<CompositeId>,
        guild_id: Option<&str>,
    ) -> Vec<T> {
        let query = query.to_lowercase();

        let mut scored: Vec<Scored<T>> = candidates
            .into_iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let score = self.score(&query, alias(&candidate));
                if score < self.config.similarity_floor {
                    return None;
                }

                Some(Scored {
                    bucket: (score * 10.0).floor() as u32,
                    popularity: popularity(&candidate).unwrap_or(0),
                    index,
                    candidate,
                })
            })
            .collect();

        scored.sort_by_key(|entry| (Reverse(entry.bucket), Reverse(entry.popularity), entry.index));

        let conflicts = self.resolver.conflicts();

        scored
            .into_iter()
            .map(|entry| entry.candidate)
            .filter(|candidate| {
                composite_id(candidate).map_or(true, |id| !conflicts.is_disabled(&id, guild_id))
            })
            .take(self.config.max_results)
            .collect()
    }
}
