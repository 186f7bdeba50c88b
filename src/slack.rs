use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::NotifyError;
use crate::notifier::Notifier;
use crate::types::{Product, ReleaseInfo, SlackPayload};

pub fn build_slack_payload(product: &Product, info: &ReleaseInfo) -> SlackPayload {
    let label = product.label.as_deref().unwrap_or("-");
    let field = |title: &str, value: &str| {
        serde_json::json!({"type": "mrkdwn", "text": format!("*{}:*\n{}", title, value)})
    };

    let fields = vec![
        field("Product Name", &product.name),
        field("Version", &product.version),
        field("Label", label),
        field("Release Date", &info.release_date),
        field("End of Life Date", &info.end_of_life_date),
    ];

    let blocks = vec![serde_json::json!({
        "type": "section",
        "fields": fields
    })];

    let text = format!(
        "{} {} reaches end of life on {}",
        product.name, product.version, info.end_of_life_date
    );

    SlackPayload { text: Some(text), blocks }
}

pub async fn send_to_slack(
    client: &reqwest::Client,
    webhook_url: &str,
    payload: &SlackPayload,
) -> Result<(), NotifyError> {
    let res = client.post(webhook_url).json(payload).send().await?;
    let status = res.status();
    // Drain the body either way so the connection can be reused.
    let body = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

/// Posts a block message to a Slack incoming webhook for every near end-of-life product.
pub struct SlackNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new<S: Into<String>>(webhook_url: S) -> Self {
        Self::with_client(reqwest::Client::new(), webhook_url)
    }

    pub fn with_client<S: Into<String>>(client: reqwest::Client, webhook_url: S) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client,
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, product: &Product, info: &ReleaseInfo) {
        let payload = build_slack_payload(product, info);
        match send_to_slack(&self.client, &self.webhook_url, &payload).await {
            Ok(()) => debug!("slack notification sent for {}", product),
            Err(e) => error!("slack notification for {} failed: {}", product, e),
        }
    }
}
