pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::GachaService;
pub use domain::{
    InventoryBackend, PoolSource, Pull, PullError, PullRequest, PullValidator, Rating,
    RatingCalculator, StandardRating,
};
pub use infrastructure::{GraphQLInventoryClient, PackPoolSource};
