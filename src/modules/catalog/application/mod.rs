pub mod aggregator;
pub mod resolver;

pub use aggregator::{AggregateOptions, Aggregator};
pub use resolver::ReferenceResolver;
