pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for easy external access
pub use application::{AggregateOptions, Aggregator, ReferenceResolver};
pub use domain::RemoteCatalog;
pub use infrastructure::{AniListCatalog, CachingRemoteCatalog, RateLimitClient};
