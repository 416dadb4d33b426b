//! Business logic services for the Pharmacy Inventory Management backend

pub mod demand;
pub mod insight;
pub mod materialize;
pub mod pipeline;
pub mod reconcile;
pub mod upload;

pub use insight::InsightService;
pub use pipeline::PipelineService;
pub use upload::UploadService;
