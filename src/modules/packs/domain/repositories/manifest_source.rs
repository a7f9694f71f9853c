use crate::modules::packs::domain::entities::Manifest;
use crate::shared::errors::AppResult;

/// Where builtin manifests are enumerated from
///
/// Loading is local and synchronous; it never waits on the network.
pub trait ManifestSource: Send + Sync {
    fn load(&self) -> AppResult<Vec<Manifest>>;
}

/// Fixed in-memory set of manifests
#[derive(Debug, Clone, Default)]
pub struct StaticManifestSource {
    manifests: Vec<Manifest>,
}

impl StaticManifestSource {
    pub fn new(manifests: Vec<Manifest>) -> Self {
        Self { manifests }
    }
}

impl ManifestSource for StaticManifestSource {
    fn load(&self) -> AppResult<Vec<Manifest>> {
        Ok(self.manifests.clone())
    }
}
