use std::process::ExitCode;

use anyhow::Context;
use policy_flatten::{config, core::summary::RunSummary, run, telemetry};
use tracing::{error, info};

fn main() -> ExitCode {
    // `.env` is optional; real env vars win over it.
    let _ = dotenvy::dotenv();

    if let Err(e) = telemetry::init("info") {
        eprintln!("logging setup failed: {e}");
    }

    match flatten() {
        Ok(summary) => {
            info!(
                tables = summary.tables.len(),
                total_ms = summary.timings_ms.total as u64,
                "flatten run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("flatten run failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn flatten() -> anyhow::Result<RunSummary> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = config::load(&args).context("load configuration")?;
    info!(
        input = %config.io.input_path.display(),
        output_dir = %config.io.output_dir.display(),
        "starting flatten run"
    );
    run::flatten_policy(&config)
}
