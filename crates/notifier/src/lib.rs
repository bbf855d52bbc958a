//! Notifier — composes the celebration message and posts it to the webhook.
//!
//! One payload per run, one POST, no retry. A non-2xx answer or a transport
//! failure is fatal and goes straight back to the caller.

pub mod composer;
pub mod transport;

use rand::Rng;

use zivijo_common::config::AppConfig;
use zivijo_common::types::{IconSet, WebhookPayload};
use zivijo_common::{AppError, Result};

pub use composer::{POSITIVE_MESSAGES, compose_message, random_icon, random_positive_message};
pub use transport::{HttpTransport, WebhookTransport};

/// Delivers celebration messages through a [`WebhookTransport`].
pub struct WebhookNotifier<T> {
    transport: T,
    channel: String,
    username: String,
    icons: IconSet,
}

impl<T: WebhookTransport> WebhookNotifier<T> {
    pub fn new(
        transport: T,
        channel: impl Into<String>,
        username: impl Into<String>,
        icons: IconSet,
    ) -> Self {
        Self {
            transport,
            channel: channel.into(),
            username: username.into(),
            icons,
        }
    }

    pub fn from_config(config: &AppConfig, transport: T) -> Self {
        Self::new(
            transport,
            config.channel.clone(),
            config.bot_username.clone(),
            config.icon_emojis.clone(),
        )
    }

    /// Compose and send the message for today's celebrants.
    ///
    /// Returns the delivered payload. Callers are expected to skip this when
    /// there is nobody to celebrate; if they don't, it fails with
    /// [`AppError::NothingToCelebrate`] before touching the network.
    pub async fn notify<R: Rng>(
        &self,
        birthday_ids: &[String],
        nameday_ids: &[String],
        rng: &mut R,
    ) -> Result<WebhookPayload> {
        let text = compose_message(birthday_ids, nameday_ids, &self.icons, rng).inspect_err(|e| {
            tracing::error!(error = %e, "This should not happen. How come there are no birthdays or namedays?");
        })?;

        let payload = WebhookPayload {
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: random_icon(&self.icons, rng).to_string(),
            text,
        };

        let response = self.transport.post(&payload).await.inspect_err(|e| {
            tracing::error!(channel = %payload.channel, error = %e, "Webhook request failed");
        })?;

        if !response.is_success() {
            tracing::error!(
                channel = %payload.channel,
                status = response.status,
                body = %response.body,
                "Failed to send notification to Mattermost"
            );
            return Err(AppError::Delivery {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!(
            channel = %payload.channel,
            icon = %payload.icon_emoji,
            "Posted message to Mattermost: {}",
            payload.text
        );

        Ok(payload)
    }
}
