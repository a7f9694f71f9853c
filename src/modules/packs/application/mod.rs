pub mod conflicts;
pub mod registry;

pub use conflicts::ConflictResolver;
pub use registry::{PackCatalog, PackRegistry, RegistrySnapshot, RegistryStats};
