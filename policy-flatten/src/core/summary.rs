//! Run summary: row counts, persisted files and timings of one pipeline run.
//!
//! The summary is returned to the caller and, when enabled, written to
//! `summary.json` next to the tables. Field names are lowercase with
//! underscores so they stay easy to query downstream.
//!
//! ```ignore
//! let mut sw = SummaryStopwatch::start();
//! // ... parse ...
//! sw.stop_parse();
//! // ... extract + persist every level ...
//! let summary = RunSummary::new(input, out_dir, tables, ids.stats())
//!     .with_timings(sw.into_timings());
//! ```

use crate::core::ids::IdCacheStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// One table handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedTable {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
    /// File written by the sink; `None` for in-memory sinks.
    pub path: Option<PathBuf>,
}

/// High-level summary of a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// ISO 8601 UTC timestamp when the summary was produced.
    pub generated_at: String,
    pub input: String,
    pub output_dir: String,
    /// Tables in the order they were persisted.
    pub tables: Vec<PersistedTable>,
    pub rows_by_table: BTreeMap<String, usize>,
    pub id_cache: IdCacheStats,
    pub timings_ms: TimingsMs,
}

impl RunSummary {
    pub fn new(
        input: impl Into<String>,
        output_dir: impl Into<String>,
        tables: Vec<PersistedTable>,
        id_cache: IdCacheStats,
    ) -> Self {
        let generated_at: DateTime<Utc> = Utc::now();
        let rows_by_table = tables.iter().map(|t| (t.name.clone(), t.rows)).collect();
        Self {
            generated_at: generated_at.to_rfc3339(),
            input: input.into(),
            output_dir: output_dir.into(),
            tables,
            rows_by_table,
            id_cache,
            timings_ms: TimingsMs::default(),
        }
    }

    pub fn with_timings(mut self, timings: TimingsMs) -> Self {
        self.timings_ms = timings;
        self
    }

    /// Row count of a table by name (0 when the table was not persisted).
    pub fn rows(&self, table: &str) -> usize {
        self.rows_by_table.get(table).copied().unwrap_or(0)
    }
}

/// Millisecond timings for the pipeline phases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingsMs {
    pub parse: u128,
    /// Extraction and persistence are interleaved per level; this is their sum.
    pub extract_persist: u128,
    pub total: u128,
}

/// Stopwatch for [`TimingsMs`].
#[derive(Debug, Clone)]
pub struct SummaryStopwatch {
    started: Instant,
    last_mark: Instant,
    tm: TimingsMs,
}

impl SummaryStopwatch {
    #[inline]
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_mark: now,
            tm: TimingsMs::default(),
        }
    }

    #[inline]
    pub fn stop_parse(&mut self) -> &mut Self {
        self.tm.parse = self.since_mark_ms();
        self
    }

    #[inline]
    pub fn stop_extract_persist(&mut self) -> &mut Self {
        self.tm.extract_persist = self.since_mark_ms();
        self
    }

    #[inline]
    pub fn into_timings(mut self) -> TimingsMs {
        self.tm.total = as_millis(self.started.elapsed());
        self.tm
    }

    #[inline]
    fn since_mark_ms(&mut self) -> u128 {
        let now = Instant::now();
        let d = now.duration_since(self.last_mark);
        self.last_mark = now;
        as_millis(d)
    }
}

#[inline]
fn as_millis(d: Duration) -> u128 {
    (d.as_secs() as u128)
        .saturating_mul(1_000)
        .saturating_add((d.subsec_nanos() as u128) / 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_by_table_follows_tables() {
        let tables = vec![
            PersistedTable {
                name: "A".into(),
                rows: 1,
                columns: vec!["PK_A".into()],
                path: None,
            },
            PersistedTable {
                name: "B".into(),
                rows: 3,
                columns: vec![],
                path: None,
            },
        ];
        let s = RunSummary::new("in.xml", "out", tables, IdCacheStats::default());
        assert_eq!(s.rows("A"), 1);
        assert_eq!(s.rows("B"), 3);
        assert_eq!(s.rows("C"), 0);
    }

    #[test]
    fn timings_serialize_with_phase_names() {
        let v = serde_json::to_value(TimingsMs::default()).unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for k in ["parse", "extract_persist", "total"] {
            assert!(keys.iter().any(|x| x == k), "{k}");
        }
    }

    #[test]
    fn stopwatch_total_covers_phases() {
        let mut sw = SummaryStopwatch::start();
        sw.stop_parse().stop_extract_persist();
        let t = sw.into_timings();
        assert!(t.total >= t.parse + t.extract_persist);
    }
}
