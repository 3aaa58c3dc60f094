pub mod memory_store;
pub mod rest_store;

pub use memory_store::*;
pub use rest_store::*;
