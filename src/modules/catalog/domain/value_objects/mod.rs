mod media_kind;
mod relation;

pub use media_kind::{MediaFormat, MediaType};
pub use relation::{CharacterRole, MediaRelation};
