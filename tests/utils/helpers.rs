/// In-memory remote catalog and engine builders
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fable_lib::modules::catalog::domain::{DisaggregatedCharacter, DisaggregatedMedia, MediaType};
use fable_lib::modules::catalog::RemoteCatalog;
use fable_lib::modules::packs::PackRegistry;
use fable_lib::shared::{AppError, AppResult, EngineConfig};
use fable_lib::Engine;

/// Remote catalog backed by vectors, counting every round trip
#[derive(Default)]
pub struct FakeCatalog {
    media: Vec<DisaggregatedMedia>,
    characters: Vec<DisaggregatedCharacter>,
    failing: bool,
    pub calls: Arc<Mutex<usize>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(mut self, media: DisaggregatedMedia) -> Self {
        self.media.push(media);
        self
    }

    pub fn with_character(mut self, character: DisaggregatedCharacter) -> Self {
        self.characters.push(character);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn record(&self) -> AppResult<()> {
        *self.calls.lock().unwrap() += 1;
        if self.failing {
            return Err(AppError::ApiError("remote catalog is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCatalog for FakeCatalog {
    fn source_id(&self) -> &str {
        "anilist"
    }

    async fn media_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedMedia>> {
        self.record()?;
        Ok(self
            .media
            .iter()
            .filter(|media| ids.contains(&media.info.id))
            .cloned()
            .collect())
    }

    async fn characters_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedCharacter>> {
        self.record()?;
        Ok(self
            .characters
            .iter()
            .filter(|character| ids.contains(&character.info.id))
            .cloned()
            .collect())
    }

    async fn search_media(
        &self,
        _text: &str,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<DisaggregatedMedia>> {
        self.record()?;
        Ok(self
            .media
            .iter()
            .filter(|media| media_type.is_none() || media.info.media_type == media_type)
            .cloned()
            .collect())
    }

    async fn search_characters(&self, _text: &str) -> AppResult<Vec<DisaggregatedCharacter>> {
        self.record()?;
        Ok(self.characters.clone())
    }
}

/// Engine over an empty registry and the given remote catalog
pub fn build_engine(remote: Arc<FakeCatalog>) -> Engine {
    build_engine_with(EngineConfig::default(), remote)
}

pub fn build_engine_with(config: EngineConfig, remote: Arc<FakeCatalog>) -> Engine {
    Engine::assemble(&config, Arc::new(PackRegistry::empty()), remote)
        .expect("engine should assemble from a valid config")
}
