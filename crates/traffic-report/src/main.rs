mod bootstrap;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sqlx::mysql::MySqlPoolOptions;
use traffic_core::settings::{ReportConfig, Settings};
use traffic_data::source::{MySqlIdentityLookup, MySqlRecordSource};
use traffic_delivery::stdout::StdoutSink;
use traffic_delivery::telegram::TelegramSink;
use traffic_delivery::ReportSink;
use traffic_runtime::report::ReportRunner;
use traffic_runtime::window::rolling_day;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Traffic Report v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = settings
        .config
        .clone()
        .or_else(bootstrap::discover_config_path)
        .context("no configuration file found; pass --config or create traffic-report.toml")?;
    let config = ReportConfig::load(&config_path)?;

    let top = settings.top.unwrap_or(config.report.top);

    // Collaborator lifecycle is owned here: construct before the run,
    // release after.
    let pool = MySqlPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await
        .context("failed to connect to the database")?;

    let records = MySqlRecordSource::new(pool.clone());
    let identities = MySqlIdentityLookup::new(pool.clone());

    let sink: Box<dyn ReportSink> = if settings.dry_run {
        tracing::info!("dry run: report will be printed, not delivered");
        Box::new(StdoutSink::new())
    } else {
        Box::new(TelegramSink::new(
            config.telegram.bot_token.clone(),
            config.telegram.chat_id.clone(),
        ))
    };

    let window = rolling_day(Utc::now())?;
    let runner = ReportRunner::new(&records, &identities, sink.as_ref(), top, config.report.markup);

    let report = runner.run(&window).await?;
    tracing::info!("report run complete ({} byte body)", report.body.len());

    pool.close().await;

    Ok(())
}
