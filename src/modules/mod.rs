// Bounded contexts
//
// packs   -> registered manifests, conflicts
// catalog -> reference resolution, aggregation, remote catalog
// search  -> fuzzy ranking over remote and pack records
// gacha   -> weighted draws committed to user inventories

pub mod catalog;
pub mod gacha;
pub mod packs;
pub mod search;
