//! Ordercast Runner — evaluation orchestration over `ordercast-core`.
//!
//! This crate builds on `ordercast-core` to provide:
//! - TOML evaluation configuration
//! - Order resolution with deterministic synthetic fallback and dataset
//!   hashing
//! - Train/test splitting at a cutoff date
//! - Persistence forecast and mean absolute error
//! - Artifact export (JSON manifest, CSV tables, Markdown report)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod forecast;
pub mod runner;
pub mod split;

pub use config::{ConfigError, EvalConfig, CUTOFF_FORMAT};
pub use data_loader::{
    compute_dataset_hash, generate_synthetic_orders, resolve_orders, DataSource, LoadedOrders,
};
pub use export::{
    export_forecast_csv, export_json, export_orders_csv, export_series_csv, import_json,
    render_markdown, save_artifacts,
};
pub use forecast::{last_defined, mean_absolute_error, persistence_forecast, ForecastError};
pub use runner::{run_evaluation, EvalResult, ForecastPoint, RunError, RunOptions, SCHEMA_VERSION};
pub use split::split_at;
