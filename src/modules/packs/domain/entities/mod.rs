mod manifest;

pub use manifest::{Manifest, PackSection};
