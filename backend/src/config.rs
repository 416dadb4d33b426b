//! Configuration management for the Pharmacy Inventory Management backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PIM_ prefix

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Remote data service configuration
    pub remote: RemoteConfig,

    /// Bundled flat-file fallback configuration
    pub data: DataFilesConfig,

    /// Local uploaded-record store configuration
    pub store: StoreConfig,

    /// Reconciliation pipeline configuration
    pub pipeline: PipelineConfig,

    /// AI insight service configuration
    pub insight: InsightConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Base URL of the remote data service
    pub base_url: String,

    /// Request timeout in seconds; bounds the remote attempt so the
    /// flat-file fallback stays responsive
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataFilesConfig {
    /// Directory holding the bundled CSV files
    pub dir: String,

    /// Purchases feed file name
    pub purchases_file: String,

    /// Sales feed file name
    pub sales_file: String,

    /// 30-day forecast feed file name
    pub forecast_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the JSON documents for uploaded records
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Fixed reference date for the future-shipment partition. When absent
    /// the pipeline uses the current UTC date at the start of each run.
    pub reference_date: Option<NaiveDate>,

    /// Drop batches whose internal stock is <= 0 from the materialized view
    pub hide_sold_out: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightConfig {
    /// Analyze endpoint of the AI insight service
    pub api_endpoint: String,

    /// API key for the insight service
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PIM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("remote.base_url", "http://localhost:5001")?
            .set_default("remote.timeout_secs", 4)?
            .set_default("data.dir", "data")?
            .set_default("data.purchases_file", "final_cleaned_purchases.csv")?
            .set_default("data.sales_file", "final_cleaned_sales.csv")?
            .set_default("data.forecast_file", "pharmacy_forecast_next_30_days.csv")?
            .set_default("store.dir", "local_store")?
            .set_default("pipeline.hide_sold_out", false)?
            .set_default("insight.api_endpoint", "")?
            .set_default("insight.api_key", "")?
            .set_default("insight.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PIM_ prefix)
            .add_source(
                Environment::with_prefix("PIM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}
