use std::path::PathBuf;
use std::time::Duration;

use tracing::level_filters::LevelFilter;
use url::Url;

use crate::error::{AppError, Result};
use crate::types::IconSet;

/// Display name the bot posts under.
pub const BOT_USERNAME: &str = "Živijó";

/// Channel used when `ZIVIJO_CHANNEL` is not set.
pub const DEFAULT_CHANNEL: &str = "town-square";

/// Upper bound on a single webhook POST.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// Application configuration, built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Incoming webhook URL (the URL itself is the credential)
    pub webhook_url: Url,

    /// Channel to post in
    pub channel: String,

    /// Roster CSV with birthdays and namedays
    pub roster_path: PathBuf,

    /// Bot display name
    pub bot_username: String,

    /// Icons drawn at random for the message and the bot avatar
    pub icon_emojis: IconSet,

    /// Log verbosity when `RUST_LOG` is not set
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self::from_vars(|key| std::env::var(key).ok())?)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = var("ZIVIJO_WEBHOOK_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("ZIVIJO_WEBHOOK_URL environment variable is required".to_string())
            })?;
        let webhook_url = parse_webhook_url(webhook_url.trim())?;

        let roster_path = var("ZIVIJO_BIRTHDAYS_CSV_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config(
                    "ZIVIJO_BIRTHDAYS_CSV_PATH environment variable is required".to_string(),
                )
            })?;

        let icon_emojis = match var("ZIVIJO_ICON_EMOJI_CSV") {
            Some(csv) => IconSet::parse(&csv)?,
            None => IconSet::default(),
        };

        let log_level = match var("ZIVIJO_LOGLEVEL") {
            Some(level) => parse_log_level(&level)?,
            None => LevelFilter::INFO,
        };

        Ok(Self {
            webhook_url,
            channel: var("ZIVIJO_CHANNEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            roster_path,
            bot_username: BOT_USERNAME.to_string(),
            icon_emojis,
            log_level,
        })
    }

    /// Host of the webhook URL, safe to put in logs.
    pub fn webhook_host(&self) -> &str {
        self.webhook_url.host_str().unwrap_or_default()
    }
}

/// The webhook must be an absolute http(s) URL with a host.
fn parse_webhook_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("ZIVIJO_WEBHOOK_URL is not a valid URL: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(
            "ZIVIJO_WEBHOOK_URL must be an http(s) URL".to_string(),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::Config(
            "ZIVIJO_WEBHOOK_URL must name a host".to_string(),
        ));
    }

    Ok(url)
}

/// Accepts the usual level names in any case, plus `warning` and `critical`.
fn parse_log_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        other => Err(AppError::Config(format!(
            "ZIVIJO_LOGLEVEL `{other}` is not a valid log level"
        ))),
    }
}
