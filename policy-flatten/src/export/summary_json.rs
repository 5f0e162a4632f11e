//! `summary.json` writer.

use crate::core::summary::RunSummary;
use crate::errors::Result;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

pub const SUMMARY_FILE: &str = "summary.json";

/// Write `summary` as pretty JSON into `out_dir` and return the file path.
pub fn write_summary(out_dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(SUMMARY_FILE);
    let f = fs::File::create(&path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, summary)?;
    w.flush()?;
    info!(path = %path.display(), "summary written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::IdCacheStats;

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let summary = RunSummary::new("in.xml", "out", vec![], IdCacheStats::default());
        let path = write_summary(dir.path(), &summary).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["input"], "in.xml");
        assert_eq!(json["id_cache"]["enabled"], false);
        assert!(json["timings_ms"]["total"].is_number());
    }
}
