// Shared Kernel - concepts used by every module

pub mod config; // Engine configuration
pub mod domain; // Shared domain concepts (value objects)
pub mod errors; // Shared error types
pub mod utils; // Shared utilities

// Re-exports for convenience
pub use config::EngineConfig;
pub use domain::{CompositeId, REMOTE_SOURCE};
pub use errors::{AppError, AppResult};
