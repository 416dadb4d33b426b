//! HTTP handlers for the Pharmacy Inventory Management backend

pub mod health;
pub mod insight;
pub mod inventory;
pub mod transaction;
pub mod upload;

pub use health::*;
pub use insight::*;
pub use inventory::*;
pub use transaction::*;
pub use upload::*;
