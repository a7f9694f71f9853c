use serde::Serialize;
use serde_json::{Map, Value};

use crate::modules::catalog::domain::entities::{AggregatedCharacter, AggregatedMedia};
use crate::modules::gacha::domain::value_objects::Rating;

/// Alternate mutation used to commit a pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMutation {
    /// Field of `data` holding the mutation result
    pub name: String,
    pub query: String,
}

/// Parameters of one draw
#[derive(Debug, Clone, Default)]
pub struct PullRequest {
    pub guild_id: String,
    /// Without a user the draw is not committed
    pub user_id: Option<String>,
    /// Star tier to draw from, spending a guarantee
    pub guarantee: Option<u8>,
    pub mutation: Option<CustomMutation>,
    /// Merged into the mutation variables
    pub extra: Map<String, Value>,
}

impl PullRequest {
    pub fn new(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            ..Self::default()
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn guaranteed(mut self, stars: u8) -> Self {
        self.guarantee = Some(stars);
        self
    }
}

/// A successful draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pull {
    /// Aggregated with its primary media edge only
    pub character: AggregatedCharacter,
    /// The primary media, fully aggregated
    pub media: AggregatedMedia,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantees: Option<Vec<u32>>,
}
