pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{Manifest, PackSection};
pub use repositories::{ManifestSource, StaticManifestSource};
pub use value_objects::ManifestType;
