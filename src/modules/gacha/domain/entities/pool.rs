use serde::Serialize;

use crate::modules::catalog::domain::value_objects::CharacterRole;
use crate::modules::gacha::domain::value_objects::PopularityRange;
use crate::shared::CompositeId;

/// One drawable character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolEntry {
    pub id: CompositeId,
}

impl PoolEntry {
    pub fn new(id: CompositeId) -> Self {
        Self { id }
    }
}

impl From<CompositeId> for PoolEntry {
    fn from(id: CompositeId) -> Self {
        Self::new(id)
    }
}

/// What a pool must be narrowed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolFilter {
    pub range: Option<PopularityRange>,
    pub role: Option<CharacterRole>,
    pub stars: Option<u8>,
}

impl PoolFilter {
    pub fn range(range: PopularityRange, role: Option<CharacterRole>) -> Self {
        Self {
            range: Some(range),
            role,
            stars: None,
        }
    }

    pub fn stars(stars: u8) -> Self {
        Self {
            stars: Some(stars),
            ..Self::default()
        }
    }
}
