use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::entities::{DisaggregatedCharacter, DisaggregatedMedia};
use crate::modules::packs::domain::value_objects::ManifestType;
use crate::shared::CompositeId;

/// Entries a pack adds and the ids it disables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackSection<T> {
    #[serde(rename = "new", default)]
    pub entries: Vec<T>,
    #[serde(default)]
    pub conflicts: Vec<CompositeId>,
}

impl<T> Default for PackSection<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            conflicts: Vec::new(),
        }
    }
}

/// A registered pack's identity, local catalog and conflicts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    #[serde(rename = "type", default)]
    pub manifest_type: ManifestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<PackSection<DisaggregatedMedia>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<PackSection<DisaggregatedCharacter>>,
    /// Extra slash commands, carried as-is for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<serde_json::Value>,
}

impl Manifest {
    pub fn new(id: impl Into<String>, manifest_type: ManifestType) -> Self {
        Self {
            id: id.into(),
            manifest_type,
            ..Self::default()
        }
    }

    /// Whether the pack contributes catalog data (entries or conflicts)
    pub fn is_data_pack(&self) -> bool {
        self.media.is_some() || self.characters.is_some()
    }

    /// Whether this manifest disables `id`
    pub fn conflicts_with(&self, id: &CompositeId) -> bool {
        let media = self
            .media
            .as_ref()
            .is_some_and(|section| section.conflicts.contains(id));

        media
            || self
                .characters
                .as_ref()
                .is_some_and(|section| section.conflicts.contains(id))
    }

    pub fn media_entries(&self) -> &[DisaggregatedMedia] {
        self.media
            .as_ref()
            .map(|section| section.entries.as_slice())
            .unwrap_or_default()
    }

    pub fn character_entries(&self) -> &[DisaggregatedCharacter] {
        self.characters
            .as_ref()
            .map(|section| section.entries.as_slice())
            .unwrap_or_default()
    }

    /// Title shown to users, falling back to the id
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}
