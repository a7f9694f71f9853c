//! Depth-1 aggregation
//!
//! Replaces the raw relation lists of a record with edges whose nodes are the
//! resolved, still disaggregated, targets.

use std::collections::HashMap;
use std::sync::Arc;

use super::resolver::ReferenceResolver;
use crate::modules::catalog::domain::entities::{
    AggregatedCharacter, AggregatedMedia, CharacterEdge, CharacterRecord, Connection,
    DisaggregatedCharacter, DisaggregatedMedia, MediaEdge, MediaRecord, MediaRoleEdge,
};
use crate::shared::{errors::AppResult, CompositeId, REMOTE_SOURCE};

#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    pub guild_id: Option<String>,
    /// Only the first `end` raw references of each list are resolved
    pub end: Option<usize>,
}

impl AggregateOptions {
    pub fn for_guild(guild_id: Option<&str>) -> Self {
        Self {
            guild_id: guild_id.map(str::to_string),
            end: None,
        }
    }

    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    fn limit(&self, len: usize) -> usize {
        self.end.map_or(len, |end| end.min(len))
    }
}

pub struct Aggregator {
    resolver: Arc<ReferenceResolver>,
}

impl Aggregator {
    pub fn new(resolver: Arc<ReferenceResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<ReferenceResolver> {
        &self.resolver
    }

    /// Aggregate a media record; an aggregated record comes back unchanged
    pub async fn media(&self, record: MediaRecord, options: &AggregateOptions) -> AppResult<AggregatedMedia> {
        let media = match record {
            MediaRecord::Aggregated(media) => return Ok(media),
            MediaRecord::Disaggregated(media) => media,
        };

        let guild_id = options.guild_id.as_deref();
        let owner = owner_source(media.info.pack_id.as_deref());

        let relation_refs = &media.relations[..options.limit(media.relations.len())];
        let character_refs = &media.characters[..options.limit(media.characters.len())];

        let relation_ids: Vec<CompositeId> = relation_refs
            .iter()
            .map(|relation| CompositeId::parse_within(&relation.media_id, owner))
            .collect();

        let character_ids: Vec<CompositeId> = character_refs
            .iter()
            .map(|character| CompositeId::parse_within(&character.character_id, owner))
            .collect();

        let relations = self
            .resolver
            .resolve_media(distinct(&relation_ids), guild_id)
            .await;

        let characters = self
            .resolver
            .resolve_characters(distinct(&character_ids), guild_id)
            .await;

        let (relations, characters) = match (relations, characters) {
            (Ok(relations), Ok(characters)) => (relations, characters),
            (Err(e), Ok(characters)) if !characters.is_empty() => {
                log::warn!("Aggregator: Dropping relations of '{}': {}", media.info.id, e);
                (Vec::new(), characters)
            }
            (Ok(relations), Err(e)) if !relations.is_empty() => {
                log::warn!("Aggregator: Dropping characters of '{}': {}", media.info.id, e);
                (relations, Vec::new())
            }
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        let relations = index_media(relations);
        let characters = index_characters(characters);

        let relation_edges = relation_refs
            .iter()
            .zip(&relation_ids)
            .filter_map(|(relation, id)| {
                relations.get(id).map(|node| MediaEdge {
                    relation: relation.relation,
                    node: node.clone(),
                })
            })
            .collect::<Vec<_>>();

        let character_edges = character_refs
            .iter()
            .zip(&character_ids)
            .filter_map(|(character, id)| {
                characters.get(id).map(|node| CharacterEdge {
                    role: character.role,
                    node: node.clone(),
                })
            })
            .collect::<Vec<_>>();

        Ok(AggregatedMedia {
            info: media.info,
            relations: Connection::from(relation_edges),
            characters: Connection::from(character_edges),
        })
    }

    /// Aggregate a character record; an aggregated record comes back unchanged
    pub async fn character(
        &self,
        record: CharacterRecord,
        options: &AggregateOptions,
    ) -> AppResult<AggregatedCharacter> {
        let character = match record {
            CharacterRecord::Aggregated(character) => return Ok(character),
            CharacterRecord::Disaggregated(character) => character,
        };

        let owner = owner_source(character.info.pack_id.as_deref());
        let media_refs = &character.media[..options.limit(character.media.len())];

        let media_ids: Vec<CompositeId> = media_refs
            .iter()
            .map(|media| CompositeId::parse_within(&media.media_id, owner))
            .collect();

        let media = index_media(
            self.resolver
                .resolve_media(distinct(&media_ids), options.guild_id.as_deref())
                .await?,
        );

        let edges = media_refs
            .iter()
            .zip(&media_ids)
            .filter_map(|(media_ref, id)| {
                media.get(id).map(|node| MediaRoleEdge {
                    role: media_ref.role,
                    node: node.clone(),
                })
            })
            .collect::<Vec<_>>();

        Ok(AggregatedCharacter {
            info: character.info,
            media: Connection::from(edges),
        })
    }
}

/// Source a bare reference belongs to
fn owner_source(pack_id: Option<&str>) -> &str {
    pack_id.unwrap_or(REMOTE_SOURCE)
}

fn distinct(ids: &[CompositeId]) -> Vec<CompositeId> {
    let mut unique: Vec<CompositeId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}

fn index_media(records: Vec<DisaggregatedMedia>) -> HashMap<CompositeId, DisaggregatedMedia> {
    records
        .into_iter()
        .filter_map(|record| record.info.composite_id().map(|id| (id, record)))
        .collect()
}

fn index_characters(
    records: Vec<DisaggregatedCharacter>,
) -> HashMap<CompositeId, DisaggregatedCharacter> {
    records
        .into_iter()
        .filter_map(|record| record.info.composite_id().map(|id| (id, record)))
        .collect()
}
