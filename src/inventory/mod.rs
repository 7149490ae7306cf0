pub mod hooks;
pub mod store;
pub mod virtual_inventory;

pub use hooks::*;
pub use store::*;
pub use virtual_inventory::*;
