use serde::{Deserialize, Serialize};

use super::{Alias, Connection, Image, MediaRoleEdge};
use crate::modules::catalog::domain::value_objects::CharacterRole;
use crate::shared::CompositeId;

/// Fields shared by both forms of a character record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
    #[serde(default)]
    pub name: Alias,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

impl CharacterInfo {
    pub fn composite_id(&self) -> Option<CompositeId> {
        self.pack_id
            .as_ref()
            .map(|pack_id| CompositeId::new(pack_id.clone(), self.id.clone()))
    }
}

/// Reference from a character to a media it appears in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMediaRef {
    pub role: CharacterRole,
    pub media_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DisaggregatedCharacter {
    #[serde(flatten)]
    pub info: CharacterInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<CharacterMediaRef>,
}

impl DisaggregatedCharacter {
    pub fn new(id: impl Into<String>, name: Alias) -> Self {
        Self {
            info: CharacterInfo {
                id: id.into(),
                name,
                ..CharacterInfo::default()
            },
            media: Vec::new(),
        }
    }

    pub fn with_pack(mut self, pack_id: impl Into<String>) -> Self {
        self.info.pack_id = Some(pack_id.into());
        self
    }

    /// Role in the first listed media, which is the character's primary one
    pub fn primary_role(&self) -> Option<CharacterRole> {
        self.media.first().map(|media| media.role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCharacter {
    #[serde(flatten)]
    pub info: CharacterInfo,
    pub media: Connection<MediaRoleEdge>,
}

impl AggregatedCharacter {
    pub fn primary_edge(&self) -> Option<&MediaRoleEdge> {
        self.media.edges.first()
    }
}

/// Either form of a character record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CharacterRecord {
    Disaggregated(DisaggregatedCharacter),
    Aggregated(AggregatedCharacter),
}

impl CharacterRecord {
    pub fn info(&self) -> &CharacterInfo {
        match self {
            CharacterRecord::Disaggregated(character) => &character.info,
            CharacterRecord::Aggregated(character) => &character.info,
        }
    }
}

impl From<DisaggregatedCharacter> for CharacterRecord {
    fn from(character: DisaggregatedCharacter) -> Self {
        CharacterRecord::Disaggregated(character)
    }
}

impl From<AggregatedCharacter> for CharacterRecord {
    fn from(character: AggregatedCharacter) -> Self {
        CharacterRecord::Aggregated(character)
    }
}
