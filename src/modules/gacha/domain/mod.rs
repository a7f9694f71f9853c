pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{CustomMutation, PoolEntry, PoolFilter, Pull, PullRequest};
pub use errors::{PullError, PullResult};
pub use repositories::{InventoryBackend, MutationResponse, PoolSource};
pub use services::PullValidator;
pub use value_objects::{GachaVariables, PopularityRange, Rating, RatingCalculator, StandardRating};
