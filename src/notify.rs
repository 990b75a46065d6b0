//! Delivery of the report to a Microsoft Teams incoming webhook.

use crate::error::{Result, WatchError};
use crate::report::DisplayBlock;
use serde::Serialize;

/// The message envelope Teams expects around an Adaptive Card
#[derive(Debug, Serialize)]
pub struct TeamsMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attachments: Vec<Attachment<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Attachment<'a> {
    content_type: &'static str,
    content: AdaptiveCard<'a>,
}

#[derive(Debug, Serialize)]
struct AdaptiveCard<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    body: Vec<Container<'a>>,
    msteams: MsTeams,
}

#[derive(Debug, Serialize)]
struct Container<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    items: &'a [DisplayBlock],
}

#[derive(Debug, Serialize)]
struct MsTeams {
    width: &'static str,
}

impl<'a> TeamsMessage<'a> {
    /// Wraps the blocks in a full-width Adaptive Card
    pub fn new(items: &'a [DisplayBlock]) -> Self {
        Self {
            kind: "message",
            attachments: vec![Attachment {
                content_type: "application/vnd.microsoft.card.adaptive",
                content: AdaptiveCard {
                    kind: "AdaptiveCard",
                    version: "1.0",
                    body: vec![Container {
                        kind: "Container",
                        items,
                    }],
                    msteams: MsTeams { width: "Full" },
                },
            }],
        }
    }
}

/// HTTP client for one webhook endpoint
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl Notifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// Posts the card; any non-success status is an error
    pub async fn post(&self, items: &[DisplayBlock]) -> Result<()> {
        let message = TeamsMessage::new(items);
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WatchError::Notify {
                status: status.as_u16(),
                body,
            });
        }

        ::log::debug!("Webhook accepted card with {} blocks", items.len());
        Ok(())
    }
}

/// Where a finished report goes
#[allow(async_fn_in_trait)]
pub trait Deliver {
    async fn deliver(&self, items: &[DisplayBlock]);
}

impl Deliver for Notifier {
    /// Posts the card and logs a failure instead of returning it
    async fn deliver(&self, items: &[DisplayBlock]) {
        ::log::info!("Process Teams posts");
        if let Err(e) = self.post(items).await {
            ::log::error!("Exception when posting to Teams webhook: {:?} ({})", e, e);
        }
    }
}

/// Prints the card JSON to stdout instead of posting it
pub struct PrintCard;

impl Deliver for PrintCard {
    async fn deliver(&self, items: &[DisplayBlock]) {
        match serde_json::to_string_pretty(&TeamsMessage::new(items)) {
            Ok(json) => println!("{}", json),
            Err(e) => ::log::error!("Failed to render card: {}", e),
        }
    }
}
