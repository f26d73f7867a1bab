//! グループボットの Webhook による送信。

use std::time::Duration;

use tracing::debug;

use super::{ApiResponse, NotifyError, SendReceipt, build_http_client, message_body};
use crate::config::MessageType;

pub struct WebhookNotifier {
    http_client: reqwest::Client,
    url: String,
    msgtype: MessageType,
}

impl WebhookNotifier {
    pub fn new(
        url: impl Into<String>,
        msgtype: MessageType,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
            url: url.into(),
            msgtype,
        })
    }

    /// Webhook URL にメッセージを POST する。
    pub async fn send(&self, content: &str) -> Result<SendReceipt, NotifyError> {
        let body = message_body(self.msgtype, content);

        debug!(msgtype = self.msgtype.as_str(), length = content.len(), "Posting to webhook");

        let response = self.http_client.post(&self.url).json(&body).send().await?;
        let response = ApiResponse::read(response).await?;

        Ok(SendReceipt {
            message_id: response.message_id(),
        })
    }
}
