pub mod config;
pub mod similarity_strategy;

pub use config::SearchConfig;
pub use similarity_strategy::{
    HybridStrategy, JaroWinklerStrategy, LevenshteinStrategy, SimilarityStrategy,
};
