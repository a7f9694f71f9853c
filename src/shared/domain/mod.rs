pub mod value_objects;

pub use value_objects::{CompositeId, REMOTE_SOURCE};
