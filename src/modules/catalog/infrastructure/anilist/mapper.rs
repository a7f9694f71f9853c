use super::models::{Character, Media};
use crate::modules::catalog::domain::entities::{
    Alias, CharacterInfo, CharacterMediaRef, CharacterRef, DisaggregatedCharacter,
    DisaggregatedMedia, Image, MediaInfo, MediaRelationRef,
};
use crate::modules::catalog::domain::value_objects::MediaRelation;
use crate::shared::{CompositeId, REMOTE_SOURCE};

/// Converts AniList pages into disaggregated catalog records
///
/// References come out fully qualified (`anilist:<id>`) so they stay valid
/// once the record leaves this source.
#[derive(Debug, Clone, Default)]
pub struct AniListMapper;

impl AniListMapper {
    pub fn new() -> Self {
        Self
    }

    fn reference(id: i64) -> String {
        CompositeId::new(REMOTE_SOURCE, id.to_string()).to_string()
    }

    fn popularity(value: Option<i64>) -> Option<u32> {
        value.and_then(|value| u32::try_from(value).ok())
    }

    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|value| !value.trim().is_empty())
    }

    pub fn map_media(&self, media: Media) -> DisaggregatedMedia {
        let title = media.title.unwrap_or_default();
        let nsfw = media.is_adult.unwrap_or(false);

        let images = media
            .cover_image
            .and_then(|cover| cover.extra_large.or(cover.large).or(cover.medium))
            .map(|url| vec![Image { url, nsfw }])
            .unwrap_or_default();

        let relations = media
            .relations
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                let node = edge.node?;
                Some(MediaRelationRef {
                    relation: edge.relation_type.unwrap_or(MediaRelation::Other),
                    media_id: Self::reference(node.id),
                })
            })
            .collect();

        let characters = media
            .characters
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                Some(CharacterRef {
                    role: edge.role?,
                    character_id: Self::reference(edge.node?.id),
                })
            })
            .collect();

        DisaggregatedMedia {
            info: MediaInfo {
                id: media.id.to_string(),
                pack_id: Some(REMOTE_SOURCE.to_string()),
                media_type: media.media_type,
                format: media.format,
                title: Alias {
                    english: Self::non_empty(title.english),
                    romaji: Self::non_empty(title.romaji),
                    native: Self::non_empty(title.native),
                    alternative: media.synonyms.unwrap_or_default(),
                },
                description: media.description,
                popularity: Self::popularity(media.popularity),
                images,
            },
            relations,
            characters,
        }
    }

    pub fn map_character(&self, character: Character) -> DisaggregatedCharacter {
        let name = character.name.unwrap_or_default();

        let images = character
            .image
            .and_then(|image| image.large.or(image.medium))
            .map(|url| vec![Image { url, nsfw: false }])
            .unwrap_or_default();

        let media = character
            .media
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                Some(CharacterMediaRef {
                    role: edge.character_role?,
                    media_id: Self::reference(edge.node?.id),
                })
            })
            .collect();

        DisaggregatedCharacter {
            info: CharacterInfo {
                id: character.id.to_string(),
                pack_id: Some(REMOTE_SOURCE.to_string()),
                name: Alias {
                    english: Self::non_empty(name.full),
                    romaji: None,
                    native: Self::non_empty(name.native),
                    alternative: name.alternative.unwrap_or_default(),
                },
                description: character.description,
                // favourites count, far smaller than media popularity; rating tiers read it as is
                popularity: Self::popularity(character.favourites),
                gender: character.gender,
                age: character.age,
                images,
            },
            media,
        }
    }
}
