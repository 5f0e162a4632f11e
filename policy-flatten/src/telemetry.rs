//! Logging setup shared by binaries embedding the library.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};

/// Crate target prefix, usable in filter directives.
pub const TARGET_PREFIX: &str = "policy_flatten";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Compact single-line formatting layer with RFC3339 UTC timestamps.
///
/// ANSI colors only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_ansi(io::stdout().is_terminal()).event_format(
        fmt::format()
            .compact()
            .with_timer(ChronoRfc3339Utc)
            .with_level(true)
            .with_target(true),
    )
}

/// `RUST_LOG` if set and valid, otherwise `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(default: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(layer())
        .try_init()
}
