//! Shared types and models for the Pharmacy Inventory Management platform
//!
//! This crate contains the row shapes, canonical records, and coercion
//! utilities shared between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
