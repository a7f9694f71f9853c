use async_trait::async_trait;

use crate::modules::catalog::domain::{
    entities::{DisaggregatedCharacter, DisaggregatedMedia},
    value_objects::MediaType,
};
use crate::shared::errors::AppResult;

/// Repository interface for the remote canonical catalog
///
/// Every method maps to exactly one remote round trip. Records come back
/// disaggregated and tagged with [`RemoteCatalog::source_id`].
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Source prefix of composite ids served by this catalog
    fn source_id(&self) -> &str;

    /// Batch lookup of media by local id
    async fn media_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedMedia>>;

    /// Batch lookup of characters by local id
    async fn characters_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedCharacter>>;

    /// Free-text media query, optionally restricted to one media type
    async fn search_media(
        &self,
        text: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<DisaggregatedMedia>>;

    /// Free-text character query
    async fn search_characters(&self, text: &str) -> AppResult<Vec<DisaggregatedCharacter>>;
}
