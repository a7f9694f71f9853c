pub mod inventory_client;
pub mod pack_pool;

pub use inventory_client::GraphQLInventoryClient;
pub use pack_pool::PackPoolSource;
