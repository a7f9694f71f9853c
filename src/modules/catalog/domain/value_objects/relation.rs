use serde::{Deserialize, Serialize};

/// How one media relates to another
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaRelation {
    Adaptation,
    Prequel,
    Sequel,
    Parent,
    SideStory,
    Character,
    Summary,
    Alternative,
    SpinOff,
    Source,
    Compilation,
    Contains,
    #[serde(other)]
    Other,
}

impl MediaRelation {
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaRelation::Adaptation => "Adaptation",
            MediaRelation::Prequel => "Prequel",
            MediaRelation::Sequel => "Sequel",
            MediaRelation::Parent => "Parent Story",
            MediaRelation::SideStory => "Side Story",
            MediaRelation::Character => "Shared Character",
            MediaRelation::Summary => "Summary",
            MediaRelation::Alternative => "Alternative",
            MediaRelation::SpinOff => "Spin-off",
            MediaRelation::Source => "Source",
            MediaRelation::Compilation => "Compilation",
            MediaRelation::Contains => "Contains",
            MediaRelation::Other => "Other",
        }
    }
}

/// Role a character plays in a media
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterRole {
    Main,
    Supporting,
    Background,
}
