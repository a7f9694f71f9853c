mod manifest_type;

pub use manifest_type::ManifestType;
