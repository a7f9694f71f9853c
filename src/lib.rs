pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::{
    catalog::{Aggregator, AniListCatalog, CachingRemoteCatalog, RateLimitClient, ReferenceResolver, RemoteCatalog},
    gacha::{GachaService, GraphQLInventoryClient, PackPoolSource, RatingCalculator, StandardRating},
    packs::{DirectoryManifestSource, PackRegistry},
    search::{SearchConfig, SearchRanker},
};
use shared::{AppResult, EngineConfig};

/// Every service wired together from one [`EngineConfig`]
pub struct Engine {
    registry: Arc<PackRegistry>,
    resolver: Arc<ReferenceResolver>,
    aggregator: Arc<Aggregator>,
    search: Arc<SearchRanker>,
    gacha: Arc<GachaService>,
}

impl Engine {
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        let registry = Arc::new(match &config.packs_dir {
            Some(dir) => PackRegistry::new(Arc::new(DirectoryManifestSource::new(dir.clone()))),
            None => PackRegistry::empty(),
        });

        // Fail fast on broken builtin packs
        registry.init()?;

        let http_client = RateLimitClient::for_anilist(
            config.anilist_requests_per_second,
            config.anilist_burst,
        )?;
        let anilist = Arc::new(AniListCatalog::with_url(http_client, &config.anilist_url));

        let remote: Arc<dyn RemoteCatalog> = if config.cache_remote {
            Arc::new(CachingRemoteCatalog::with_ttl(anilist, config.cache_ttl()))
        } else {
            anilist
        };

        Self::assemble(config, registry, remote)
    }

    /// Wire the services around an already built registry and remote catalog
    pub fn assemble(
        config: &EngineConfig,
        registry: Arc<PackRegistry>,
        remote: Arc<dyn RemoteCatalog>,
    ) -> AppResult<Self> {
        let resolver = Arc::new(ReferenceResolver::new(registry.clone(), remote));
        let aggregator = Arc::new(Aggregator::new(resolver.clone()));

        let search = Arc::new(SearchRanker::new(
            resolver.clone(),
            SearchConfig::new(config.search_max_results)?,
        ));

        let rating: Arc<dyn RatingCalculator> = Arc::new(StandardRating);
        let pool_source = Arc::new(PackPoolSource::new(registry.clone(), rating.clone()));

        let mut gacha = GachaService::new(aggregator.clone(), pool_source)
            .with_rating(rating)
            .enabled(config.gacha_enabled);

        match (&config.inventory_url, &config.inventory_secret) {
            (Some(url), Some(secret)) => {
                gacha = gacha.with_inventory(Arc::new(GraphQLInventoryClient::new(url, secret)?));
            }
            _ => log::warn!("Engine: No inventory backend configured, user pulls will fail"),
        }

        log::info!(
            "Engine: Ready with {} visible packs",
            registry.snapshot().len()
        );

        Ok(Self {
            registry,
            resolver,
            aggregator,
            search,
            gacha: Arc::new(gacha),
        })
    }

    pub fn registry(&self) -> &Arc<PackRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &Arc<ReferenceResolver> {
        &self.resolver
    }

    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }

    pub fn search(&self) -> &Arc<SearchRanker> {
        &self.search
    }

    pub fn gacha(&self) -> &Arc<GachaService> {
        &self.gacha
    }
}
