pub mod inventory_backend;
pub mod pool_source;

#[cfg(test)]
pub use inventory_backend::MockInventoryBackend;
pub use inventory_backend::{
    AddCharacterRequest, Inventory, InventoryBackend, InventoryUser, MutationResponse,
};
pub use pool_source::PoolSource;
