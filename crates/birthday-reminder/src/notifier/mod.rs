//! 企業微信 (WeCom) への通知送信。
//!
//! グループボットの Webhook と、企業内アプリの access_token による送信の 2 種類に対応する。

mod app;
mod webhook;

pub use app::AppNotifier;
pub use webhook::WebhookNotifier;

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{MessageType, NotifierConfig};
use crate::version::USER_AGENT;

/// Webhook URL を上書きする環境変数。
pub const WEBHOOK_URL_ENV: &str = "WEWORK_WEBHOOK_URL";
/// アプリの Secret を上書きする環境変数。
pub const CORP_SECRET_ENV: &str = "WEWORK_CORP_SECRET";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook URL is not configured (set notifier.url or WEWORK_WEBHOOK_URL)")]
    MissingWebhookUrl,

    #[error("Corp secret is not configured (set notifier.corp_secret or WEWORK_CORP_SECRET)")]
    MissingCorpSecret,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("WeCom API error {errcode}: {errmsg}")]
    Api { errcode: i64, errmsg: String },

    #[error("Access token missing in response")]
    MissingAccessToken,

    #[error("Response is missing errcode")]
    MissingErrcode,
}

/// 送信成功時の情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// WeCom が返したメッセージ ID（返されない場合もある）
    pub message_id: Option<String>,
}

/// 設定に応じた送信先。
pub enum Notifier {
    Webhook(WebhookNotifier),
    App(AppNotifier),
}

impl Notifier {
    /// 設定と環境変数から送信先を作成する。
    ///
    /// # Arguments
    /// * `config` - 通知先の設定
    /// * `env` - 環境変数の参照（通常は `std::env::var(key).ok()`）
    pub fn from_config<F>(config: &NotifierConfig, env: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match config {
            NotifierConfig::Webhook(webhook) => {
                let url = resolve_secret(&webhook.url, env(WEBHOOK_URL_ENV))
                    .ok_or(NotifyError::MissingWebhookUrl)?;
                Ok(Notifier::Webhook(WebhookNotifier::new(
                    url,
                    webhook.msgtype,
                    webhook.timeout,
                )?))
            }
            NotifierConfig::App(app) => {
                let secret = resolve_secret(&app.corp_secret, env(CORP_SECRET_ENV))
                    .ok_or(NotifyError::MissingCorpSecret)?;
                Ok(Notifier::App(AppNotifier::new(app, secret)?))
            }
        }
    }

    /// メッセージを送信する。
    pub async fn send(&self, content: &str) -> Result<SendReceipt, NotifyError> {
        match self {
            Notifier::Webhook(webhook) => webhook.send(content).await,
            Notifier::App(app) => app.send(content).await,
        }
    }
}

/// 環境変数の値があればそれを、なければ設定値を返す。どちらも空なら `None`。
fn resolve_secret(configured: &str, env: Option<String>) -> Option<String> {
    env.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| Some(configured.trim().to_string()).filter(|v| !v.is_empty()))
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, NotifyError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// `{"msgtype": "markdown", "markdown": {"content": ...}}` 形式の本文を作る。
fn message_body(msgtype: MessageType, content: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut body = serde_json::Map::new();
    body.insert("msgtype".to_string(), msgtype.as_str().into());
    body.insert(
        msgtype.as_str().to_string(),
        serde_json::json!({ "content": content }),
    );
    body
}

/// WeCom API 共通のレスポンス。
#[derive(Debug, Deserialize)]
struct ApiResponse {
    errcode: Option<i64>,
    #[serde(default)]
    errmsg: String,
    #[serde(default)]
    msgid: Option<serde_json::Value>,
    #[serde(default)]
    access_token: Option<String>,
}

impl ApiResponse {
    /// HTTP レスポンスを読み取り、`errcode` が 0 以外または欠けていればエラーにする。
    async fn read(response: reqwest::Response) -> Result<Self, NotifyError> {
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }

        let body: ApiResponse = response.json().await?;
        match body.errcode {
            Some(0) => Ok(body),
            Some(errcode) => Err(NotifyError::Api {
                errcode,
                errmsg: body.errmsg,
            }),
            None => Err(NotifyError::MissingErrcode),
        }
    }

    fn message_id(&self) -> Option<String> {
        match self.msgid.as_ref()? {
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
