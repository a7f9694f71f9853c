use strsim::{jaro_winkler, normalized_levenshtein};

use crate::shared::errors::{AppError, AppResult};

/// Scores how close a query is to one name
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
/// Inputs are compared as given; callers normalize case.
pub trait SimilarityStrategy: Send + Sync {
    fn calculate(&self, query: &str, target: &str) -> f64;

    /// Name for logging
    fn name(&self) -> &'static str;
}

/// Jaro-Winkler, weighted toward matching prefixes
#[derive(Debug, Clone, Default)]
pub struct JaroWinklerStrategy;

impl SimilarityStrategy for JaroWinklerStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        jaro_winkler(query, target)
    }

    fn name(&self) -> &'static str {
        "JaroWinkler"
    }
}

/// Normalized Levenshtein, forgiving of single-character typos
#[derive(Debug, Clone, Default)]
pub struct LevenshteinStrategy;

impl SimilarityStrategy for LevenshteinStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        normalized_levenshtein(query, target)
    }

    fn name(&self) -> &'static str {
        "Levenshtein"
    }
}

/// Weighted average of several strategies
pub struct HybridStrategy {
    strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>,
}

impl HybridStrategy {
    /// Weights must sum to 1.0
    pub fn new(strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>) -> AppResult<Self> {
        let weight_sum: f64 = strategies.iter().map(|(_, weight)| weight).sum();

        if (weight_sum - 1.0).abs() >= 0.01 {
            return Err(AppError::ConfigError(format!(
                "Strategy weights must sum to 1.0, got {}",
                weight_sum
            )));
        }

        Ok(Self { strategies })
    }

    /// Jaro-Winkler 70% + Levenshtein 30%
    pub fn default_hybrid() -> Self {
        Self {
            strategies: vec![
                (Box::new(JaroWinklerStrategy), 0.7),
                (Box::new(LevenshteinStrategy), 0.3),
            ],
        }
    }
}

impl SimilarityStrategy for HybridStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        self.strategies
            .iter()
            .map(|(strategy, weight)| strategy.calculate(query, target) * weight)
            .sum()
    }

    fn name(&self) -> &'static str {
        "Hybrid"
    }
}
