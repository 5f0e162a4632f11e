//! High-level orchestration: XML document → one table per nesting level.
//!
//! Levels run in [`Level::ALL`] order, so every extractor finds its parent's
//! rows already produced. Each table goes to the sink right after it is
//! extracted; children only keep the parent's key rows and element borrows.

use crate::{
    config::model::FlattenConfig,
    core::{
        ids::IdGenerator,
        summary::{PersistedTable, RunSummary, SummaryStopwatch},
        traits::TableSink,
        xml_tree,
    },
    errors::{FlattenError, Result},
    export::{parquet::ParquetSink, summary_json},
    extract::{self, LevelOutput, Scoped, levels, root::extract_root},
    model::{element::Element, level::Level},
};
use anyhow::Context;
use std::collections::HashMap;
use tracing::info;

/// Run the whole pipeline for `config`: parse, extract, write parquet files
/// and (optionally) `summary.json`.
#[tracing::instrument(level = "info", skip_all, fields(input = %config.io.input_path.display()))]
pub fn flatten_policy(config: &FlattenConfig) -> anyhow::Result<RunSummary> {
    let mut sw = SummaryStopwatch::start();

    let doc = xml_tree::parse_file(&config.io.input_path)
        .with_context(|| format!("read {}", config.io.input_path.display()))?;
    let msg = xml_tree::message_root(&doc)?;
    sw.stop_parse();
    info!("document parsed");

    let mut ids = IdGenerator::new(config.ids.cache);
    let mut sink = ParquetSink::new(&config.io.output_dir, config.output.compression);
    let tables = run_pipeline(msg, &mut sink, &mut ids).context("flatten document")?;
    sw.stop_extract_persist();

    let summary = RunSummary::new(
        config.io.input_path.display().to_string(),
        config.io.output_dir.display().to_string(),
        tables,
        ids.stats(),
    )
    .with_timings(sw.into_timings());

    if config.output.write_summary {
        summary_json::write_summary(&config.io.output_dir, &summary)?;
    }

    info!(
        tables = summary.tables.len(),
        out_dir = %config.io.output_dir.display(),
        "all tables saved"
    );
    Ok(summary)
}

/// Extract every level of `msg` and hand each table to `sink`.
///
/// Returns the persisted tables in extraction order.
#[tracing::instrument(level = "debug", skip_all, fields(root = %msg.tag))]
pub fn run_pipeline(
    msg: &Element,
    sink: &mut dyn TableSink,
    ids: &mut IdGenerator,
) -> Result<Vec<PersistedTable>> {
    let mut scopes: HashMap<Level, Vec<Scoped<'_>>> = HashMap::new();
    let mut persisted = Vec::with_capacity(Level::ALL.len());

    for level in Level::ALL {
        let LevelOutput { table, scopes: rows } = match levels::spec_for(level) {
            None => extract_root(msg, ids)?,
            Some(spec) => {
                let parent = level.parent().unwrap_or(Level::PersAutoPolicyModRq);
                let parents = scopes.get(&parent).ok_or_else(|| FlattenError::KeyBinding {
                    ancestor: parent.key_name().to_string(),
                    table: level.table_name().to_string(),
                })?;
                extract::extract_level(&spec, parents, ids)?
            }
        };

        persisted.push(sink.persist(table)?);
        scopes.insert(level, rows);
    }

    Ok(persisted)
}

/// Parse `xml` and run the pipeline into `sink`.
pub fn flatten_str(
    xml: &str,
    sink: &mut dyn TableSink,
    ids: &mut IdGenerator,
) -> Result<Vec<PersistedTable>> {
    let doc = xml_tree::parse_document(xml)?;
    let msg = xml_tree::message_root(&doc)?;
    run_pipeline(msg, sink, ids)
}
