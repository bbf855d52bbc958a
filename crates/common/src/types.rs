use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Icon tokens used when `ZIVIJO_ICON_EMOJI_CSV` is not set.
pub const DEFAULT_ICON_EMOJIS: [&str; 6] = [
    ":champagne:",
    ":tada:",
    ":clinking_glasses:",
    ":confetti_ball:",
    ":gift:",
    ":birthday:",
];

/// Prefix every chat mention handle starts with.
pub const MENTION_PREFIX: char = '@';

/// One validated roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub email: String,
    /// Mention handle, always non-empty and prefixed with `@`.
    pub user_id: String,
    pub birth_date: Option<NaiveDate>,
    pub name_date: Option<NaiveDate>,
}

/// Mention handles celebrated today, split by occasion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Celebrants {
    pub birthday_ids: Vec<String>,
    pub nameday_ids: Vec<String>,
}

impl Celebrants {
    pub fn is_empty(&self) -> bool {
        self.birthday_ids.is_empty() && self.nameday_ids.is_empty()
    }
}

/// Body posted to the incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub text: String,
}

/// Status and body returned by the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Non-empty set of `:name:` icon tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet(Vec<String>);

impl IconSet {
    /// Parse a comma-separated list such as `:tada:,:gift:`.
    ///
    /// Blank entries are ignored; anything else that is not shaped like
    /// `:name:` is rejected.
    pub fn parse(csv: &str) -> Result<Self> {
        let mut icons = Vec::new();
        for token in csv.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !is_icon_token(token) {
                return Err(AppError::Config(format!(
                    "icon `{token}` must look like `:name:`"
                )));
            }
            icons.push(token.to_string());
        }

        if icons.is_empty() {
            return Err(AppError::Config(
                "at least one icon emoji must be configured".to_string(),
            ));
        }

        Ok(Self(icons))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, icon: &str) -> bool {
        self.0.iter().any(|i| i == icon)
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self(DEFAULT_ICON_EMOJIS.iter().map(|s| s.to_string()).collect())
    }
}

impl std::fmt::Display for IconSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// `true` for tokens shaped like `:name:`.
pub fn is_icon_token(token: &str) -> bool {
    token.len() > 2 && token.starts_with(':') && token.ends_with(':')
}
