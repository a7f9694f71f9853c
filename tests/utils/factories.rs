/// Record and manifest builders with sensible defaults
use fable_lib::modules::catalog::domain::{
    Alias, CharacterMediaRef, CharacterRef, CharacterRole, DisaggregatedCharacter,
    DisaggregatedMedia, MediaRelation, MediaRelationRef, MediaType,
};
use fable_lib::modules::packs::{Manifest, ManifestType, PackSection};
use fable_lib::shared::CompositeId;

pub struct MediaFactory {
    media: DisaggregatedMedia,
}

impl MediaFactory {
    pub fn new(id: &str, title: &str) -> Self {
        let mut media = DisaggregatedMedia::new(id, Alias::english(title));
        media.info.media_type = Some(MediaType::Anime);
        Self { media }
    }

    pub fn popularity(mut self, popularity: u32) -> Self {
        self.media.info.popularity = Some(popularity);
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media.info.media_type = Some(media_type);
        self
    }

    pub fn relation(mut self, relation: MediaRelation, media_id: &str) -> Self {
        self.media.relations.push(MediaRelationRef {
            relation,
            media_id: media_id.to_string(),
        });
        self
    }

    pub fn character(mut self, role: CharacterRole, character_id: &str) -> Self {
        self.media.characters.push(CharacterRef {
            role,
            character_id: character_id.to_string(),
        });
        self
    }

    pub fn build(self) -> DisaggregatedMedia {
        self.media
    }
}

pub struct CharacterFactory {
    character: DisaggregatedCharacter,
}

impl CharacterFactory {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            character: DisaggregatedCharacter::new(id, Alias::english(name)),
        }
    }

    pub fn popularity(mut self, popularity: u32) -> Self {
        self.character.info.popularity = Some(popularity);
        self
    }

    pub fn appears_in(mut self, role: CharacterRole, media_id: &str) -> Self {
        self.character.media.push(CharacterMediaRef {
            role,
            media_id: media_id.to_string(),
        });
        self
    }

    pub fn build(self) -> DisaggregatedCharacter {
        self.character
    }
}

pub struct ManifestFactory {
    manifest: Manifest,
}

impl ManifestFactory {
    pub fn new(id: &str) -> Self {
        Self {
            manifest: Manifest::new(id, ManifestType::Manual),
        }
    }

    pub fn media(mut self, media: DisaggregatedMedia) -> Self {
        self.manifest
            .media
            .get_or_insert_with(PackSection::default)
            .entries
            .push(media);
        self
    }

    pub fn character(mut self, character: DisaggregatedCharacter) -> Self {
        self.manifest
            .characters
            .get_or_insert_with(PackSection::default)
            .entries
            .push(character);
        self
    }

    pub fn conflicts_media(mut self, id: &str) -> Self {
        self.manifest
            .media
            .get_or_insert_with(PackSection::default)
            .conflicts
            .push(CompositeId::parse(id));
        self
    }

    pub fn conflicts_character(mut self, id: &str) -> Self {
        self.manifest
            .characters
            .get_or_insert_with(PackSection::default)
            .conflicts
            .push(CompositeId::parse(id));
        self
    }

    pub fn build(self) -> Manifest {
        self.manifest
    }
}
