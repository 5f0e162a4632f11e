//! Parquet sink.
//!
//! Layout:
//!   out_dir/
//!     TABLE_PersAutoPolicyModRq.parquet
//!     TABLE_PersAutoPolicyModRq_Producer.parquet
//!     ...
//!
//! Every column is a nullable UTF-8 string, in table column order. Files are
//! created with truncation, so re-running with the same names replaces the
//! earlier output.

use crate::config::model::ParquetCompression;
use crate::core::{summary::PersistedTable, traits::TableSink};
use crate::errors::Result;
use crate::model::table::Table;
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct ParquetSink {
    out_dir: PathBuf,
    compression: ParquetCompression,
}

impl ParquetSink {
    pub fn new(out_dir: impl Into<PathBuf>, compression: ParquetCompression) -> Self {
        Self {
            out_dir: out_dir.into(),
            compression,
        }
    }

    /// Target file for a table name.
    pub fn path_for(&self, table: &str) -> PathBuf {
        self.out_dir.join(format!("{table}.parquet"))
    }
}

impl TableSink for ParquetSink {
    fn persist(&mut self, table: Table) -> Result<PersistedTable> {
        let path = self.path_for(table.name());
        info!(table = table.name(), rows = table.len(), path = %path.display(), "saving table");

        if let Err(e) = write_table(&path, &table, codec(self.compression)) {
            error!(table = table.name(), path = %path.display(), error = %e, "error saving table");
            return Err(e);
        }

        info!(table = table.name(), path = %path.display(), "saved table");
        let persisted = PersistedTable {
            name: table.name().to_string(),
            rows: table.len(),
            columns: table.columns().to_vec(),
            path: Some(path),
        };
        drop(table);
        debug!(table = %persisted.name, "released in-memory table");
        Ok(persisted)
    }
}

/// Build a single Arrow batch from `table`.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.as_str(), DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|c| Arc::new(StringArray::from(table.column(c))) as ArrayRef)
        .collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

fn write_table(path: &Path, table: &Table, compression: Compression) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let batch = to_record_batch(table)?;
    let props = WriterProperties::builder()
        .set_compression(compression)
        .build();

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn codec(c: ParquetCompression) -> Compression {
    match c {
        ParquetCompression::Snappy => Compression::SNAPPY,
        ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
        ParquetCompression::Gzip => Compression::GZIP(GzipLevel::default()),
        ParquetCompression::Uncompressed => Compression::UNCOMPRESSED,
    }
}
