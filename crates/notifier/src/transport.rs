//! Webhook transport — the single outbound HTTP call.

use std::time::Duration;

use reqwest::Client;

use zivijo_common::types::{WebhookPayload, WebhookResponse};
use zivijo_common::{AppError, Result};

/// Something that can deliver a payload to the chat webhook.
///
/// Implementations report whatever status the endpoint answered with; judging
/// success is left to the notifier.
pub trait WebhookTransport {
    fn post(&self, payload: &WebhookPayload) -> impl Future<Output = Result<WebhookResponse>>;
}

impl<T: WebhookTransport + ?Sized> WebhookTransport for &T {
    fn post(&self, payload: &WebhookPayload) -> impl Future<Output = Result<WebhookResponse>> {
        (**self).post(payload)
    }
}

/// JSON-over-HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl WebhookTransport for HttpTransport {
    async fn post(&self, payload: &WebhookPayload) -> Result<WebhookResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        // The status alone decides delivery; an unreadable body is reported empty.
        let body = response.text().await.unwrap_or_default();

        Ok(WebhookResponse { status, body })
    }
}
