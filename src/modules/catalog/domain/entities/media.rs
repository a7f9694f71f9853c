use serde::{Deserialize, Serialize};

use super::{Alias, CharacterEdge, Connection, Image, MediaEdge};
use crate::modules::catalog::domain::value_objects::{
    CharacterRole, MediaFormat, MediaRelation, MediaType,
};
use crate::shared::CompositeId;

/// Fields shared by both forms of a media record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<MediaFormat>,
    #[serde(default)]
    pub title: Alias,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

impl MediaInfo {
    pub fn composite_id(&self) -> Option<CompositeId> {
        self.pack_id
            .as_ref()
            .map(|pack_id| CompositeId::new(pack_id.clone(), self.id.clone()))
    }
}

/// Reference from a media to another media
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRelationRef {
    pub relation: MediaRelation,
    pub media_id: String,
}

/// Reference from a media to one of its characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRef {
    pub role: CharacterRole,
    pub character_id: String,
}

/// Media whose relations are still references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DisaggregatedMedia {
    #[serde(flatten)]
    pub info: MediaInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<MediaRelationRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<CharacterRef>,
}

impl DisaggregatedMedia {
    pub fn new(id: impl Into<String>, title: Alias) -> Self {
        Self {
            info: MediaInfo {
                id: id.into(),
                title,
                ..MediaInfo::default()
            },
            ..Self::default()
        }
    }

    /// Tag the record with the source it was resolved from
    pub fn with_pack(mut self, pack_id: impl Into<String>) -> Self {
        self.info.pack_id = Some(pack_id.into());
        self
    }
}

/// Media with relations resolved one level deep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMedia {
    #[serde(flatten)]
    pub info: MediaInfo,
    pub relations: Connection<MediaEdge>,
    pub characters: Connection<CharacterEdge>,
}

/// Either form of a media record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MediaRecord {
    Disaggregated(DisaggregatedMedia),
    Aggregated(AggregatedMedia),
}

impl MediaRecord {
    pub fn info(&self) -> &MediaInfo {
        match self {
            MediaRecord::Disaggregated(media) => &media.info,
            MediaRecord::Aggregated(media) => &media.info,
        }
    }
}

impl From<DisaggregatedMedia> for MediaRecord {
    fn from(media: DisaggregatedMedia) -> Self {
        MediaRecord::Disaggregated(media)
    }
}

impl From<AggregatedMedia> for MediaRecord {
    fn from(media: AggregatedMedia) -> Self {
        MediaRecord::Aggregated(media)
    }
}
