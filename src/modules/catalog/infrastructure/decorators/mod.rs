pub mod caching_catalog;

pub use caching_catalog::{CacheStats, CachingRemoteCatalog};
