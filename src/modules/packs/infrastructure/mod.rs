pub mod directory_source;

pub use directory_source::DirectoryManifestSource;
