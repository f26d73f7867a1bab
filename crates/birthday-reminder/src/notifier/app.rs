//! 企業内アプリによる送信。
//!
//! `gettoken` で access_token を取得してから `message/send` を呼ぶ。
//! 1 回の実行で 1 通しか送らないため、トークンはキャッシュしない。

use tracing::debug;

use super::{ApiResponse, NotifyError, SendReceipt, build_http_client, message_body};
use crate::config::{AppConfig, MessageType};

pub struct AppNotifier {
    http_client: reqwest::Client,
    base_url: String,
    corp_id: String,
    corp_secret: String,
    agent_id: u64,
    to_user: String,
    msgtype: MessageType,
}

impl AppNotifier {
    /// `corp_secret` は設定値と環境変数を解決済みのものを渡す。
    pub fn new(config: &AppConfig, corp_secret: String) -> Result<Self, NotifyError> {
        Ok(Self {
            http_client: build_http_client(config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            corp_id: config.corp_id.clone(),
            corp_secret,
            agent_id: config.agent_id,
            to_user: config.to_user.clone(),
            msgtype: config.msgtype,
        })
    }

    pub async fn send(&self, content: &str) -> Result<SendReceipt, NotifyError> {
        let access_token = self.fetch_access_token().await?;

        let mut body = message_body(self.msgtype, content);
        body.insert("touser".to_string(), self.to_user.clone().into());
        body.insert("agentid".to_string(), self.agent_id.into());

        debug!(
            agent_id = self.agent_id,
            to_user = %self.to_user,
            msgtype = self.msgtype.as_str(),
            "Sending app message"
        );

        let response = self
            .http_client
            .post(format!("{}/cgi-bin/message/send", self.base_url))
            .query(&[("access_token", access_token.as_str())])
            .json(&body)
            .send()
            .await?;
        let response = ApiResponse::read(response).await?;

        Ok(SendReceipt {
            message_id: response.message_id(),
        })
    }

    async fn fetch_access_token(&self) -> Result<String, NotifyError> {
        let response = self
            .http_client
            .get(format!("{}/cgi-bin/gettoken", self.base_url))
            .query(&[
                ("corpid", self.corp_id.as_str()),
                ("corpsecret", self.corp_secret.as_str()),
            ])
            .send()
            .await?;

        ApiResponse::read(response)
            .await?
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(NotifyError::MissingAccessToken)
    }
}
