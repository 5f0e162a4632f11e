//! Table sinks and run artifacts.

pub mod memory;
pub mod parquet;
pub mod summary_json;
