//! In-memory remote catalog for unit tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::modules::catalog::domain::{
    entities::{DisaggregatedCharacter, DisaggregatedMedia},
    repositories::RemoteCatalog,
    value_objects::MediaType,
};
use crate::shared::errors::{AppError, AppResult};

#[derive(Default)]
pub struct FakeRemoteCatalog {
    media: Vec<DisaggregatedMedia>,
    characters: Vec<DisaggregatedCharacter>,
    fail_media: bool,
    fail_characters: bool,
    pub media_calls: Arc<Mutex<usize>>,
    pub character_calls: Arc<Mutex<usize>>,
    pub search_calls: Arc<Mutex<usize>>,
    pub requested: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeRemoteCatalog {
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

    pub fn failing_media(mut self) -> Self {
        self.fail_media = true;
        self
    }

    pub fn failing_characters(mut self) -> Self {
        self.fail_characters = true;
        self
    }

    pub fn calls(&self) -> usize {
        *self.media_calls.lock().unwrap()
            + *self.character_calls.lock().unwrap()
            + *self.search_calls.lock().unwrap()
    }
}

#[async_trait]
impl RemoteCatalog for FakeRemoteCatalog {
    fn source_id(&self) -> &str {
        "anilist"
    }

    async fn media_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedMedia>> {
        *self.media_calls.lock().unwrap() += 1;
        self.requested.lock().unwrap().push(ids.to_vec());

        if self.fail_media {
            return Err(AppError::ApiError("remote media unavailable".to_string()));
        }

        Ok(self
            .media
            .iter()
            .filter(|media| ids.contains(&media.info.id))
            .cloned()
            .collect())
    }

    async fn characters_by_ids(&self, ids: &[String]) -> AppResult<Vec<DisaggregatedCharacter>> {
        *self.character_calls.lock().unwrap() += 1;
        self.requested.lock().unwrap().push(ids.to_vec());

        if self.fail_characters {
            return Err(AppError::ApiError("remote characters unavailable".to_string()));
        }

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
        *self.search_calls.lock().unwrap() += 1;

        if self.fail_media {
            return Err(AppError::ApiError("remote media unavailable".to_string()));
        }

        Ok(self
            .media
            .iter()
            .filter(|media| media_type.is_none() || media.info.media_type == media_type)
            .cloned()
            .collect())
    }

    async fn search_characters(&self, _text: &str) -> AppResult<Vec<DisaggregatedCharacter>> {
        *self.search_calls.lock().unwrap() += 1;

        if self.fail_characters {
            return Err(AppError::ApiError("remote characters unavailable".to_string()));
        }

        Ok(self.characters.clone())
    }
}
