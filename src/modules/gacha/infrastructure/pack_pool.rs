use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::domain::entities::DisaggregatedCharacter;
use crate::modules::gacha::domain::{
    repositories::PoolSource,
    value_objects::{RatingCalculator, LOWEST_POPULARITY},
    PoolEntry, PoolFilter,
};
use crate::modules::packs::{PackCatalog, PackRegistry};
use crate::shared::{errors::AppResult, CompositeId};

/// Pool built from the characters of the guild's data packs
pub struct PackPoolSource {
    registry: Arc<PackRegistry>,
    rating: Arc<dyn RatingCalculator>,
}

impl PackPoolSource {
    pub fn new(registry: Arc<PackRegistry>, rating: Arc<dyn RatingCalculator>) -> Self {
        Self { registry, rating }
    }

    /// Own popularity, else the primary media's when it is local, else the floor
    fn popularity(
        &self,
        character: &DisaggregatedCharacter,
        catalog: &PackCatalog,
        guild_id: &str,
    ) -> u32 {
        if let Some(popularity) = character.info.popularity.filter(|popularity| *popularity > 0) {
            return popularity;
        }

        character
            .media
            .first()
            .map(|media| CompositeId::parse_within(&media.media_id, catalog.pack_id()))
            .and_then(|id| {
                if id.source() == catalog.pack_id() {
                    catalog.media(id.local())
                } else {
                    self.registry
                        .catalog(id.source(), Some(guild_id))
                        .and_then(|other| other.media(id.local()))
                }
            })
            .and_then(|media| media.info.popularity)
            .filter(|popularity| *popularity > 0)
            .unwrap_or(LOWEST_POPULARITY)
    }
}

#[async_trait]
impl PoolSource for PackPoolSource {
    async fn pool(&self, filter: &PoolFilter, guild_id: &str) -> AppResult<Vec<PoolEntry>> {
        let mut entries = Vec::new();

        for catalog in self.registry.catalogs(Some(guild_id)) {
            for character in catalog.all_characters() {
                let role = character.primary_role();
                let popularity = self.popularity(&character, &catalog, guild_id);

                if filter.range.is_some_and(|range| !range.contains(popularity)) {
                    continue;
                }

                if filter.role.is_some_and(|wanted| role != Some(wanted)) {
                    continue;
                }

                if filter
                    .stars
                    .is_some_and(|stars| self.rating.rate(popularity, role).stars != stars)
                {
                    continue;
                }

                if let Some(id) = character.info.composite_id() {
                    entries.push(PoolEntry::new(id));
                }
            }
        }

        log::debug!("Gacha: Pack pool for {:?} has {} entries", filter, entries.len());

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::entities::{Alias, CharacterMediaRef, DisaggregatedMedia};
    use crate::modules::catalog::domain::value_objects::CharacterRole;
    use crate::modules::gacha::domain::value_objects::{PopularityRange, StandardRating};
    use crate::modules::packs::{Manifest, ManifestType, PackSection};

    fn character(id: &str, popularity: Option<u32>, role: CharacterRole, media_id: &str) -> DisaggregatedCharacter {
        let mut character = DisaggregatedCharacter::new(id, Alias::english(id));
        character.info.popularity = popularity;
        character.media.push(CharacterMediaRef {
            role,
            media_id: media_id.to_string(),
        });
        character
    }

    fn source() -> PackPoolSource {
        let mut popular = DisaggregatedMedia::new("m", Alias::english("media"));
        popular.info.popularity = Some(120_000);

        let mut manifest = Manifest::new("pack", ManifestType::Manual);
        manifest.media = Some(PackSection {
            entries: vec![popular],
            conflicts: vec![],
        });
        manifest.characters = Some(PackSection {
            entries: vec![
                character("low", Some(2_000), CharacterRole::Main, "m"),
                character("borrowed", None, CharacterRole::Supporting, "m"),
                character("remote-media", None, CharacterRole::Main, "anilist:1"),
            ],
            conflicts: vec![],
        });

        let registry = Arc::new(PackRegistry::empty());
        registry.register(manifest, None);

        PackPoolSource::new(registry, Arc::new(StandardRating))
    }

    fn ids(entries: &[PoolEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_range_filter_uses_media_popularity_fallback() {
        let filter = PoolFilter::range(PopularityRange::new(100_000, Some(200_000)), None);

        let pool = source().pool(&filter, "guild").await.unwrap();

        assert_eq!(ids(&pool), vec!["pack:borrowed"]);
    }

    #[tokio::test]
    async fn test_lowest_range_includes_unknown_popularity() {
        let filter = PoolFilter::range(PopularityRange::new(1000, Some(50_000)), None);

        let pool = source().pool(&filter, "guild").await.unwrap();

        assert_eq!(ids(&pool), vec!["pack:low", "pack:remote-media"]);
    }

    #[tokio::test]
    async fn test_role_and_star_filters() {
        let source = source();

        let supporting = source
            .pool(
                &PoolFilter::range(PopularityRange::new(100_000, Some(200_000)), Some(CharacterRole::Main)),
                "guild",
            )
            .await
            .unwrap();
        assert!(supporting.is_empty());

        let two_stars = source.pool(&PoolFilter::stars(2), "guild").await.unwrap();
        assert_eq!(ids(&two_stars), vec!["pack:borrowed"]);
    }
}
