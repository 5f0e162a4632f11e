//! Unified error types for the crate.
//!
//! Every failure is fatal for a run: the pipeline performs a single pass over
//! a single document and surfaces the first error to the caller.

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, FlattenError>;

/// Top-level error for flattening operations.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A required single-valued element is absent from its parent scope.
    #[error("missing required field `{field}` in `{scope}`")]
    MissingField { field: String, scope: String },

    /// An ancestor row exposes neither `PK_<name>` nor `FK_<name>`.
    /// Indicates extractors ran out of order.
    #[error("cannot bind key of ancestor `{ancestor}` for table `{table}`")]
    KeyBinding { ancestor: String, table: String },

    /// Malformed input document.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow batch construction errors.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet encoding/writing errors.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// JSON serialization errors (run summary).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config file errors.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl FlattenError {
    pub(crate) fn missing(field: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            scope: scope.into(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for FlattenError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.into())
    }
}
