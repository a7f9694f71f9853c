use async_trait::async_trait;
use serde_json::{json, Value};

use crate::modules::catalog::infrastructure::http_client::RateLimitClient;
use crate::modules::gacha::domain::repositories::{
    AddCharacterRequest, InventoryBackend, MutationResponse,
};
use crate::shared::errors::{AppError, AppResult};

/// Field of `data` the default mutation answers in
pub const ADD_CHARACTER_FIELD: &str = "addCharacterToInventory";

pub const ADD_CHARACTER_MUTATION: &str = r#"
mutation (
  $userId: String!
  $guildId: String!
  $characterId: String!
  $mediaId: String!
  $guaranteed: Boolean!
  $rating: Int!
) {
  addCharacterToInventory(
    userId: $userId
    guildId: $guildId
    characterId: $characterId
    mediaId: $mediaId
    guaranteed: $guaranteed
    rating: $rating
  ) {
    ok
    error
    inventory {
      availablePulls
      rechargeTimestamp
      user {
        guarantees
      }
    }
  }
}
"#;

/// Inventory backend reached over GraphQL with a bearer secret
pub struct GraphQLInventoryClient {
    http_client: RateLimitClient,
    url: String,
}

impl GraphQLInventoryClient {
    pub fn new(url: &str, secret: &str) -> AppResult<Self> {
        Ok(Self {
            http_client: RateLimitClient::for_inventory(secret)?,
            url: url.to_string(),
        })
    }

    /// Request body and the `data` field holding the result
    fn body(request: &AddCharacterRequest) -> AppResult<(Value, String)> {
        let (name, query) = match &request.mutation {
            Some(mutation) => (mutation.name.as_str(), mutation.query.as_str()),
            None => (ADD_CHARACTER_FIELD, ADD_CHARACTER_MUTATION),
        };

        let body = json!({
            "query": query,
            "variables": serde_json::to_value(request)?,
        });

        Ok((body, name.to_string()))
    }
}

#[async_trait]
impl InventoryBackend for GraphQLInventoryClient {
    async fn add_character(&self, request: &AddCharacterRequest) -> AppResult<MutationResponse> {
        let (body, name) = Self::body(request)?;

        log::debug!(
            "Inventory: Adding {} for user {} in guild {}",
            request.character_id,
            request.user_id,
            request.guild_id
        );

        let response: Value = self.http_client.post_json(&self.url, &body).await?;

        if let Some(errors) = response.get("errors") {
            log::error!("Inventory: GraphQL errors in response: {}", errors);
            return Err(AppError::ApiError(format!("Inventory GraphQL errors: {}", errors)));
        }

        let result = response
            .get("data")
            .and_then(|data| data.get(name.as_str()))
            .cloned()
            .ok_or_else(|| AppError::ApiError(format!("No {} field in inventory response", name)))?;

        serde_json::from_value(result).map_err(|e| {
            AppError::SerializationError(format!("Failed to deserialize inventory response: {}", e))
        })
    }
}
