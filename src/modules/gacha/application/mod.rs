pub mod service;

pub use service::GachaService;
