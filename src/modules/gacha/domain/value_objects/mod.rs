pub mod rating;
pub mod variables;

pub use rating::{Rating, RatingCalculator, StandardRating, MIN_STARS};
pub use variables::{GachaVariables, PopularityRange, WeightedTable, LOWEST_POPULARITY};
