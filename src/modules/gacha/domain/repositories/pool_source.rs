use async_trait::async_trait;

use crate::modules::gacha::domain::entities::{PoolEntry, PoolFilter};
use crate::shared::errors::AppResult;

/// Supplies the candidates of one draw
///
/// Entries only need to roughly match the filter; every candidate is
/// validated again before it can be pulled.
#[async_trait]
pub trait PoolSource: Send + Sync {
    async fn pool(&self, filter: &PoolFilter, guild_id: &str) -> AppResult<Vec<PoolEntry>>;
}
