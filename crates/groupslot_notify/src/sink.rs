// --- File: crates/groupslot_notify/src/sink.rs ---
//! Delivery sinks for reminder messages.

use groupslot_common::models::NotificationMessage;
use groupslot_common::services::{BoxFuture, DeliverySink};
use groupslot_common::GroupslotError;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when posting to the reminder webhook
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The request could not be sent or its answer not read
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The webhook answered with a non-success status
    #[error("webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Writes each reminder to the log. Used when no webhook is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDeliverySink;

impl DeliverySink for LoggingDeliverySink {
    fn deliver<'a>(
        &'a self,
        recipient: &'a str,
        message: &'a NotificationMessage,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            info!(recipient, title = %message.title, "{}", message.body);
            Ok(())
        })
    }
}

/// JSON body posted for every recipient.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub recipient: &'a str,
    pub title: &'a str,
    pub body: &'a str,
}

/// POSTs each reminder to an HTTP endpoint that owns the actual transport
/// (email, push).
pub struct WebhookDeliverySink {
    client: Client,
    url: String,
}

impl WebhookDeliverySink {
    /// Builds a sink whose requests give up after `timeout`, so an endpoint
    /// that never answers cannot hold a scan open.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, recipient: &str, message: &NotificationMessage) -> Result<(), WebhookError> {
        let payload = WebhookPayload {
            recipient,
            title: &message.title,
            body: &message.body,
        };
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(WebhookError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(recipient, status = status.as_u16(), "Webhook accepted reminder");
        Ok(())
    }
}

impl DeliverySink for WebhookDeliverySink {
    fn deliver<'a>(
        &'a self,
        recipient: &'a str,
        message: &'a NotificationMessage,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.post(recipient, message)
                .await
                .map_err(|err| GroupslotError::Delivery {
                    recipient: recipient.to_string(),
                    message: err.to_string(),
                })
        })
    }
}
