use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Config discovery ───────────────────────────────────────────────────────────

/// Locate the report configuration file when `--config` is not given.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./traffic-report.toml`
/// 2. `~/.config/traffic-report/config.toml`
///
/// Returns `None` when neither path exists.
pub fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("traffic-report.toml");
    if local.exists() {
        return Some(local);
    }

    let home = dirs::home_dir()?;
    let user = home
        .join(".config")
        .join("traffic-report")
        .join("config.toml");
    user.exists().then_some(user)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
