use crate::shared::errors::{AppError, AppResult};

/// Tunables of the search ranker
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Candidates scoring below this are discarded
    pub similarity_floor: f64,
    /// Results returned per search
    pub max_results: usize,
}

impl SearchConfig {
    pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.65;

    pub fn new(max_results: usize) -> AppResult<Self> {
        Self {
            max_results,
            ..Self::default()
        }
        .validated()
    }

    pub fn with_floor(mut self, similarity_floor: f64) -> AppResult<Self> {
        self.similarity_floor = similarity_floor;
        self.validated()
    }

    fn validated(self) -> AppResult<Self> {
        if !(0.0..=1.0).contains(&self.similarity_floor) {
            return Err(AppError::ConfigError(format!(
                "Similarity floor must be within 0.0..=1.0, got {}",
                self.similarity_floor
            )));
        }

        if self.max_results == 0 {
            return Err(AppError::ConfigError(
                "Search must return at least one result".to_string(),
            ));
        }

        Ok(self)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_floor: Self::DEFAULT_SIMILARITY_FLOOR,
            max_results: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 1);
        assert_eq!(config.similarity_floor, 0.65);
    }

    #[test]
    fn test_validation() {
        assert!(SearchConfig::new(0).is_err());
        assert!(SearchConfig::new(5).unwrap().with_floor(1.5).is_err());
        assert_eq!(SearchConfig::new(5).unwrap().max_results, 5);
    }
}
