//! Tracing subscriber setup.
//!
//! Output format comes from `CATALOG_LOG_FORMAT` (`json` or `pretty`, default
//! `json`); filtering from `RUST_LOG` (default `info`).

use core::str::FromStr;

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "CATALOG_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Initialize tracing from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops). An unknown
/// `CATALOG_LOG_FORMAT` falls back to JSON and is reported through the
/// installed subscriber.
pub fn init() {
    let raw = std::env::var(LOG_FORMAT_VAR).ok();
    let (format, rejected) = resolve_format(raw.as_deref());
    init_with(format, "info");
    if let Some(reason) = rejected {
        warn_format_fallback(&reason);
    }
}

/// Pick the format for a raw variable value; the second element carries the
/// parse error when the value was rejected.
fn resolve_format(raw: Option<&str>) -> (LogFormat, Option<String>) {
    match raw.map(str::parse::<LogFormat>) {
        None => (LogFormat::default(), None),
        Some(Ok(format)) => (format, None),
        Some(Err(reason)) => (LogFormat::Json, Some(reason)),
    }
}

fn warn_format_fallback(reason: &str) {
    ::tracing::warn!(var = LOG_FORMAT_VAR, reason, "falling back to json log format");
}

/// Install a subscriber with an explicit format; `default_filter` applies when
/// `RUST_LOG` is unset.
pub fn init_with(format: LogFormat, default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
