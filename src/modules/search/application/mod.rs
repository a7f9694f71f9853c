pub mod ranker;

pub use ranker::{alias_to_array, SearchRanker};
