//! Resolved links of an aggregated record
//!
//! Every edge node is the disaggregated form, so an aggregated record can
//! never nest a second aggregated level.

use serde::{Deserialize, Serialize};

use super::{DisaggregatedCharacter, DisaggregatedMedia};
use crate::modules::catalog::domain::value_objects::{CharacterRole, MediaRelation};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection<E> {
    pub edges: Vec<E>,
}

impl<E> Default for Connection<E> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<E> From<Vec<E>> for Connection<E> {
    fn from(edges: Vec<E>) -> Self {
        Self { edges }
    }
}

/// Media to related media
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaEdge {
    pub relation: MediaRelation,
    pub node: DisaggregatedMedia,
}

/// Media to one of its characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterEdge {
    pub role: CharacterRole,
    pub node: DisaggregatedCharacter,
}

/// Character to a media it appears in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRoleEdge {
    pub role: CharacterRole,
    pub node: DisaggregatedMedia,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nsfw: bool,
}
