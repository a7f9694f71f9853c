use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
use mockall::automock;

use crate::modules::gacha::domain::entities::CustomMutation;
use crate::shared::errors::AppResult;

/// Commit of one pulled character
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCharacterRequest {
    pub user_id: String,
    pub guild_id: String,
    pub character_id: String,
    pub media_id: String,
    pub guaranteed: bool,
    pub rating: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub mutation: Option<CustomMutation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUser {
    #[serde(default)]
    pub guarantees: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub available_pulls: Option<u32>,
    pub recharge_timestamp: Option<String>,
    pub user: Option<InventoryUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub inventory: Option<Inventory>,
}

impl MutationResponse {
    pub fn ok(inventory: Inventory) -> Self {
        Self {
            ok: true,
            error: None,
            inventory: Some(inventory),
        }
    }

    pub fn error(code: &str) -> Self {
        Self {
            ok: false,
            error: Some(code.to_string()),
            inventory: None,
        }
    }
}

/// Persistent store of user inventories
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// Atomically add a character to the user's inventory
    async fn add_character(&self, request: &AddCharacterRequest) -> AppResult<MutationResponse>;
}
