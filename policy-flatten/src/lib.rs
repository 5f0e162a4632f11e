//! Flattens a `PersAutoPolicyModRq` XML message into normalized tables, one
//! per nesting level, linked by content-addressed surrogate keys.
//!
//! Entry points:
//! - [`run::flatten_policy`]: full run from a [`config::model::FlattenConfig`]
//!   (parse file, write parquet tables and `summary.json`);
//! - [`run::run_pipeline`] / [`run::flatten_str`]: same extraction into any
//!   [`core::traits::TableSink`].

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod extract;
pub mod model;
pub mod run;
pub mod telemetry;

pub use errors::{FlattenError, Result};
