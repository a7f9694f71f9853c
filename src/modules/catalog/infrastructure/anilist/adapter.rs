//! AniList remote catalog
//!
//! GraphQL adapter that serves the `anilist` source: batched lookups by id and
//! free-text search, one request per call.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::modules::catalog::{
    domain::{
        entities::{DisaggregatedCharacter, DisaggregatedMedia},
        repositories::RemoteCatalog,
        value_objects::MediaType,
    },
    infrastructure::http_client::RateLimitClient,
};
use crate::shared::{
    config::DEFAULT_ANILIST_URL,
    errors::{AppError, AppResult},
    REMOTE_SOURCE,
};

use super::{mapper::AniListMapper, models::AniListPageResponse, queries::*};

/// Largest page AniList serves
const MAX_PER_PAGE: usize = 50;

/// Candidates requested for a text search
const SEARCH_PER_PAGE: usize = 25;

pub struct AniListCatalog {
    http_client: RateLimitClient,
    base_url: String,
    mapper: AniListMapper,
}

impl AniListCatalog {
    pub fn new(http_client: RateLimitClient) -> Self {
        Self::with_url(http_client, DEFAULT_ANILIST_URL)
    }

    pub fn with_url(http_client: RateLimitClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.to_string(),
            mapper: AniListMapper::new(),
        }
    }

    /// Numeric ids only; anything else can never exist on AniList
    fn numeric_ids(ids: &[String]) -> Vec<i64> {
        ids.iter()
            .filter_map(|id| match id.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    log::debug!("AniList: Dropping non-numeric id '{}'", id);
                    None
                }
            })
            .collect()
    }

    /// Page size for a batched lookup; ids past one page are not returned
    fn page_size(ids: &[i64], kind: &str) -> usize {
        if ids.len() > MAX_PER_PAGE {
            log::warn!(
                "AniList: {} {} ids requested but one page holds {}; the rest are dropped",
                ids.len(),
                kind,
                MAX_PER_PAGE
            );
        }
        ids.len().min(MAX_PER_PAGE)
    }

    async fn make_graphql_request(&self, query: &str, variables: Value) -> AppResult<AniListPageResponse> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        log::debug!("AniList: Sending GraphQL request variables: {}", body["variables"]);

        let graphql_response: Value = self.http_client.post_json(&self.base_url, &body).await?;

        if let Some(errors) = graphql_response.get("errors") {
            log::error!("AniList: GraphQL errors in response: {}", errors);
            return Err(AppError::ApiError(format!("AniList GraphQL errors: {}", errors)));
        }

        let data = graphql_response
            .get("data")
            .cloned()
            .ok_or_else(|| AppError::ApiError("No data field in AniList response".to_string()))?;

        serde_json::from_value(data).map_err(|e| {
            AppError::SerializationError(format!("Failed to deserialize AniList data: {}", e))
        })
    }
}

#[async_trait]
impl RemoteCatalog for AniListCatalog {
    fn source_id(&self) -> &str {
        REMOTE_SOURCE
    }

    async fn media_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedMedia>> {
        let ids = Self::numeric_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        log::info!("AniList: Fetching {} media by id", ids.len());

        let variables = json!({ "ids": ids, "perPage": Self::page_size(&ids, "media") });
        let response = self.make_graphql_request(MEDIA_BY_IDS_QUERY, variables).await?;

        Ok(response
            .page
            .media
            .into_iter()
            .map(|media| self.mapper.map_media(media))
            .collect())
    }

    async fn characters_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedCharacter>> {
        let ids = Self::numeric_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        log::info!("AniList: Fetching {} characters by id", ids.len());

        let variables = json!({ "ids": ids, "perPage": Self::page_size(&ids, "character") });
        let response = self
            .make_graphql_request(CHARACTERS_BY_IDS_QUERY, variables)
            .await?;

        Ok(response
            .page
            .characters
            .into_iter()
            .map(|character| self.mapper.map_character(character))
            .collect())
    }

    async fn search_media(
        &self,
        text: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<DisaggregatedMedia>> {
        log::info!("AniList: Searching media for '{}' ({:?})", text, media_type);

        let variables = json!({
            "search": text,
            "type": media_type,
            "perPage": SEARCH_PER_PAGE,
        });

        let response = self.make_graphql_request(MEDIA_SEARCH_QUERY, variables).await?;

        Ok(response
            .page
            .media
            .into_iter()
            .map(|media| self.mapper.map_media(media))
            .collect())
    }

    async fn search_characters(&self, text: &str) -> AppResult<Vec<DisaggregatedCharacter>> {
        log::info!("AniList: Searching characters for '{}'", text);

        let variables = json!({ "search": text, "perPage": SEARCH_PER_PAGE });

        let response = self
            .make_graphql_request(CHARACTER_SEARCH_QUERY, variables)
            .await?;

        Ok(response
            .page
            .characters
            .into_iter()
            .map(|character| self.mapper.map_character(character))
            .collect())
    }
}
