pub mod adapter;
pub mod mapper;
pub mod models;
pub mod queries;

pub use adapter::AniListCatalog;
pub use mapper::AniListMapper;
