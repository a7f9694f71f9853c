pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ConflictResolver, PackCatalog, PackRegistry, RegistryStats};
pub use domain::{Manifest, ManifestSource, ManifestType, PackSection, StaticManifestSource};
pub use infrastructure::DirectoryManifestSource;
