//! External API integrations

pub mod insight;

pub use insight::InsightClient;
