pub mod anilist;
pub mod decorators;
pub mod http_client;

pub use anilist::AniListCatalog;
pub use decorators::CachingRemoteCatalog;
pub use http_client::{RateLimitClient, RateLimitInfo};
