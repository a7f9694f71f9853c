use std::sync::Arc;

use super::registry::PackRegistry;
use crate::shared::CompositeId;

/// Answers whether an id has been disabled by a visible data pack
#[derive(Clone)]
pub struct ConflictResolver {
    registry: Arc<PackRegistry>,
}

impl ConflictResolver {
    pub fn new(registry: Arc<PackRegistry>) -> Self {
        Self { registry }
    }

    /// True when any data pack visible to the guild lists `id` in its
    /// media or characters conflicts
    pub fn is_disabled(&self, id: &CompositeId, guild_id: Option<&str>) -> bool {
        self.registry
            .list_for(guild_id, None)
            .iter()
            .any(|manifest| manifest.conflicts_with(id))
    }

    /// Keeps the ids no visible data pack disables, listing the packs once
    pub fn retain_enabled(&self, ids: Vec<CompositeId>, guild_id: Option<&str>) -> Vec<CompositeId> {
        if ids.is_empty() {
            return ids;
        }

        let manifests = self.registry.list_for(guild_id, None);

        ids.into_iter()
            .filter(|id| {
                let disabled = manifests.iter().any(|manifest| manifest.conflicts_with(id));
                if disabled {
                    log::debug!("Packs: '{}' is disabled", id);
                }
                !disabled
            })
            .collect()
    }

    pub fn registry(&self) -> &Arc<PackRegistry> {
        &self.registry
    }
}
