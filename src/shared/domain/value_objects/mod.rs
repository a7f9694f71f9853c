mod composite_id;

pub use composite_id::{CompositeId, REMOTE_SOURCE};
