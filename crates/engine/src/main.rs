//! Živijó binary entrypoint. Meant to be run once a day by an external scheduler.

use tracing_subscriber::EnvFilter;

use zivijo_common::config::{AppConfig, WEBHOOK_TIMEOUT};
use zivijo_engine::processor::{RunOutcome, run};
use zivijo_notifier::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing; RUST_LOG wins over ZIVIJO_LOGLEVEL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level.into())
                .from_env_lossy(),
        )
        .init();

    tracing::info!("Starting Živijó Mattermost webhook");
    tracing::info!(
        webhook_host = %config.webhook_host(),
        channel = %config.channel,
        roster_path = %config.roster_path.display(),
        bot_username = %config.bot_username,
        icon_emojis = %config.icon_emojis,
        "Configuration loaded"
    );

    let today = chrono::Local::now().date_naive();
    let transport = HttpTransport::new(config.webhook_url.as_str(), WEBHOOK_TIMEOUT)?;

    let outcome = run(&config, today, transport, &mut rand::rng())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Run failed"))?;

    match outcome {
        RunOutcome::Sent(payload) => {
            tracing::info!(channel = %payload.channel, "Celebration posted");
        }
        RunOutcome::NothingToCelebrate => tracing::info!("Nothing to celebrate today"),
        RunOutcome::NoRecords => tracing::info!("Roster had no usable records"),
    }

    Ok(())
}
