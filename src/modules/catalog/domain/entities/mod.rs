mod alias;
mod character;
mod edges;
mod media;

pub use alias::Alias;
pub use character::{
    AggregatedCharacter, CharacterInfo, CharacterMediaRef, CharacterRecord,
    DisaggregatedCharacter,
};
pub use edges::{CharacterEdge, Connection, Image, MediaEdge, MediaRoleEdge};
pub use media::{
    AggregatedMedia, CharacterRef, DisaggregatedMedia, MediaInfo, MediaRecord, MediaRelationRef,
};
