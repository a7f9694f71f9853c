pub mod validator;

pub use validator::{effective_popularity, PullValidator};
