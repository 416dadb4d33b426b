//! Domain models for the Pharmacy Inventory Management platform

mod forecast;
mod insight;
mod medicine;
mod purchase;
mod sale;

pub use forecast::*;
pub use insight::*;
pub use medicine::*;
pub use purchase::*;
pub use sale::*;

/// Origin of a canonical record after adaptation.
///
/// The reconciler treats the two origins differently in exactly one place:
/// only feed-sourced purchases can be diverted into future shipments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Remote data service or bundled CSV files
    CsvFeed,
    /// User-uploaded rows read from the local store
    Uploaded,
}
