//! Provider implementations

pub mod inventory;

pub use inventory::{InventoryError, InventoryProvider, InventorySnapshot, ResourceDetails};
