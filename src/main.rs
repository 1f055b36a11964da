//! Surf Notifier — Binary Entrypoint
//! Wires the fixture acquisition source, the file-backed subscriber
//! directory, and the email/SMS channels, then runs the cycle scheduler.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use surf_notifier::acquire::{config::load_spots_default, FixtureReportSource};
use surf_notifier::cycle::{spawn_scheduler, CycleOrchestrator};
use surf_notifier::directory::StaticDirectory;
use surf_notifier::notify::{SmsGatewayChannel, SmtpEmailChannel};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("surf_notifier=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let interval_secs: u64 = std::env::var("SURF_CHECK_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    let spots = load_spots_default().context("load spot list")?;
    if spots.is_empty() {
        tracing::warn!("spot list is empty; cycles will produce no observations");
    }

    // The real scraper lives outside this service; reports come from a JSON
    // fixture path until it is plugged in.
    let fixture_path = std::env::var("SURF_FIXTURE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config/reports.json"));
    let source = Arc::new(
        FixtureReportSource::from_path(&fixture_path).context("load report fixture")?,
    );

    let directory = Arc::new(StaticDirectory::from_default_path().context("load subscribers")?);
    let email = Arc::new(SmtpEmailChannel::from_env().context("configure SMTP")?);
    let sms = Arc::new(SmsGatewayChannel::from_env());

    let orchestrator = Arc::new(CycleOrchestrator::new(
        source, directory, email, sms, spots,
    ));

    tracing::info!(interval_secs, "surf-notifier started");
    let scheduler = spawn_scheduler(orchestrator, interval_secs);

    tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;
    // Shutdown path: stop accepting new cycles; in-memory state is discarded.
    scheduler.abort();
    tracing::info!("shutting down");
    Ok(())
}
