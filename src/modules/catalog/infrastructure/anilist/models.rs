//! AniList GraphQL response models
//!
//! Only the fields the catalog reads are declared; everything else is ignored.

use serde::Deserialize;

use crate::modules::catalog::domain::value_objects::{
    CharacterRole, MediaFormat, MediaRelation, MediaType,
};

/// `data` of every catalog query
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AniListPageResponse {
    #[serde(rename = "Page", default)]
    pub page: Page,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Page {
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub format: Option<MediaFormat>,
    pub title: Option<MediaTitle>,
    pub synonyms: Option<Vec<String>>,
    pub description: Option<String>,
    pub popularity: Option<i64>,
    pub is_adult: Option<bool>,
    pub cover_image: Option<MediaCoverImage>,
    pub relations: Option<MediaConnection>,
    pub characters: Option<CharacterConnection>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaCoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
}

/// Bare node reference inside an edge
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NodeId {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MediaConnection {
    #[serde(default)]
    pub edges: Vec<MediaEdge>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaEdge {
    pub relation_type: Option<MediaRelation>,
    pub node: Option<NodeId>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterConnection {
    #[serde(default)]
    pub edges: Vec<CharacterEdge>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterEdge {
    pub role: Option<CharacterRole>,
    pub node: Option<NodeId>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: Option<CharacterName>,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub favourites: Option<i64>,
    pub image: Option<CharacterImage>,
    pub media: Option<CharacterMediaConnection>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterName {
    pub full: Option<String>,
    pub native: Option<String>,
    pub alternative: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CharacterMediaConnection {
    #[serde(default)]
    pub edges: Vec<CharacterMediaEdge>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMediaEdge {
    pub character_role: Option<CharacterRole>,
    pub node: Option<NodeId>,
}
