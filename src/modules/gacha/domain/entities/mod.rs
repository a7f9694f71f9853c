pub mod pool;
pub mod pull;

pub use pool::{PoolEntry, PoolFilter};
pub use pull::{CustomMutation, Pull, PullRequest};
