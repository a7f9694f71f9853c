pub mod application;
pub mod domain;

pub use application::{alias_to_array, SearchRanker};
pub use domain::{SearchConfig, SimilarityStrategy};
