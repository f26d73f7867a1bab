use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use birthday_calendar::{Birthday, BirthdayError, CalendarKind, DEFAULT_ADVANCE_DAYS, Person};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub people: Vec<PersonConfig>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SettingsConfig {
    /// 「今日」を決めるタイムゾーン
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// 個人設定が無い人物に適用する事前通知日数
    #[serde(default = "default_advance_days")]
    pub default_advance_days: Vec<u32>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_advance_days: default_advance_days(),
        }
    }
}

fn default_timezone() -> Tz {
    chrono_tz::Asia::Shanghai
}

fn default_advance_days() -> Vec<u32> {
    DEFAULT_ADVANCE_DAYS.to_vec()
}

/// 通知先の設定。`kind` で種類を切り替える。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// グループボットの Webhook
    Webhook(WebhookConfig),
    /// 企業内アプリ（access_token による送信）
    App(AppConfig),
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        match self {
            NotifierConfig::Webhook(webhook) => webhook.timeout,
            NotifierConfig::App(app) => app.timeout,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig::Webhook(WebhookConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Webhook URL。環境変数 `WEWORK_WEBHOOK_URL` が設定されていればそちらを優先する
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub msgtype: MessageType,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=YOUR_WEBHOOK_KEY"
                .to_string(),
            msgtype: MessageType::default(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub corp_id: String,
    /// アプリの Secret。環境変数 `WEWORK_CORP_SECRET` が設定されていればそちらを優先する
    #[serde(default)]
    pub corp_secret: String,
    pub agent_id: u64,
    #[serde(default = "default_to_user")]
    pub to_user: String,
    #[serde(default)]
    pub msgtype: MessageType,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_to_user() -> String {
    "@all".to_string()
}

fn default_base_url() -> String {
    "https://qyapi.weixin.qq.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

/// 送信するメッセージの形式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Markdown,
    Text,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Markdown => "markdown",
            MessageType::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PersonConfig {
    pub name: String,
    /// `<月>-<日>` 形式。農暦なら `腊月-廿二` のような漢数字も使える
    pub birthday: String,
    /// `solar` または `lunar`
    #[serde(default = "default_calendar")]
    pub calendar: String,
    /// 事前通知日数。省略時は `settings.default_advance_days` を使う
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_days: Option<Vec<u32>>,
}

fn default_calendar() -> String {
    "solar".to_string()
}

impl PersonConfig {
    pub fn to_person(&self) -> Result<Person, BirthdayError> {
        let kind: CalendarKind = self.calendar.parse()?;
        let birthday = Birthday::parse(kind, &self.birthday)?;
        Ok(Person {
            name: self.name.clone(),
            birthday,
            advance_days: self.advance_days.clone(),
        })
    }
}

impl Config {
    /// 設定された人物を解析する。誕生日を解釈できない人物は警告を出して除外する。
    pub fn people(&self) -> Vec<Person> {
        self.people
            .iter()
            .filter_map(|person| match person.to_person() {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(
                        person = %person.name,
                        birthday = %person.birthday,
                        calendar = %person.calendar,
                        error = %e,
                        "Invalid birthday, skipping"
                    );
                    None
                }
            })
            .collect()
    }
}

pub fn open_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
    let config: Config = toml::from_str(&content).context("Failed to parse configuration file")?;
    Ok(config)
}

pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = Config {
        settings: SettingsConfig::default(),
        notifier: NotifierConfig::default(),
        people: vec![
            PersonConfig {
                name: "张三".to_string(),
                birthday: "10-16".to_string(),
                calendar: "solar".to_string(),
                advance_days: None,
            },
            PersonConfig {
                name: "李四".to_string(),
                birthday: "腊月-廿二".to_string(),
                calendar: "lunar".to_string(),
                advance_days: Some(vec![0, 3, 7]),
            },
        ],
    };
    let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_example_config() {
        let content = include_str!("../../../config.example.toml");
        let config: Config = toml::from_str(content).expect("Failed to parse config.example.toml");

        let expected = Config {
            settings: SettingsConfig {
                timezone: chrono_tz::Asia::Shanghai,
                default_advance_days: vec![0, 3],
            },
            notifier: NotifierConfig::Webhook(WebhookConfig {
                url: "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=YOUR_WEBHOOK_KEY"
                    .to_string(),
                msgtype: MessageType::Markdown,
                timeout: Duration::from_secs(10),
            }),
            people: vec![
                PersonConfig {
                    name: "张三".to_string(),
                    birthday: "10-16".to_string(),
                    calendar: "solar".to_string(),
                    advance_days: None,
                },
                PersonConfig {
                    name: "李四".to_string(),
                    birthday: "腊月-廿二".to_string(),
                    calendar: "lunar".to_string(),
                    advance_days: Some(vec![0, 1, 7]),
                },
                PersonConfig {
                    name: "王五".to_string(),
                    birthday: "八月-十五".to_string(),
                    calendar: "lunar".to_string(),
                    advance_days: None,
                },
            ],
        };

        assert_eq!(config, expected);
        assert_eq!(config.people().len(), 3);
    }

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let content = r#"
            [notifier]
            kind = "webhook"

            [[people]]
            name = "张三"
            birthday = "1-1"
        "#;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.settings, SettingsConfig::default());
        assert_eq!(config.settings.default_advance_days, vec![0]);
        assert_eq!(
            config.notifier,
            NotifierConfig::Webhook(WebhookConfig {
                url: String::new(),
                msgtype: MessageType::Markdown,
                timeout: Duration::from_secs(10),
            })
        );
        assert_eq!(config.people[0].calendar, "solar");
    }

    #[test]
    fn parse_app_notifier() {
        let content = r#"
            [settings]
            timezone = "Asia/Tokyo"

            [notifier]
            kind = "app"
            corp_id = "ww123"
            corp_secret = "secret"
            agent_id = 1000002
            msgtype = "text"
            timeout = "30s"
        "#;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.settings.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(
            config.notifier,
            NotifierConfig::App(AppConfig {
                corp_id: "ww123".to_string(),
                corp_secret: "secret".to_string(),
                agent_id: 1000002,
                to_user: "@all".to_string(),
                msgtype: MessageType::Text,
                base_url: "https://qyapi.weixin.qq.com".to_string(),
                timeout: Duration::from_secs(30),
            })
        );
        assert_eq!(config.notifier.timeout(), Duration::from_secs(30));
        assert!(config.people.is_empty());
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let content = r#"
            [settings]
            timezone = "Mars/Olympus_Mons"

            [notifier]
            kind = "webhook"
        "#;
        assert!(toml::from_str::<Config>(content).is_err());
    }

    #[test]
    fn invalid_people_are_skipped() {
        let content = r#"
            [notifier]
            kind = "webhook"

            [[people]]
            name = "ok"
            birthday = "3-8"

            [[people]]
            name = "bad-date"
            birthday = "2-30"

            [[people]]
            name = "bad-numeral"
            birthday = "腊月-xx"
            calendar = "lunar"

            [[people]]
            name = "bad-calendar"
            birthday = "3-8"
            calendar = "julian"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        let people = config.people();

        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "ok");
        assert_eq!(people[0].birthday, Birthday::Solar { month: 3, day: 8 });
    }

    #[test]
    fn default_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        write_default_config(&path).unwrap();
        let config = open_config(&path).unwrap();

        assert_eq!(config.settings, SettingsConfig::default());
        assert_eq!(config.notifier, NotifierConfig::default());
        assert_eq!(config.people.len(), 2);
        assert_eq!(
            config.people()[1].birthday,
            Birthday::Lunar { month: 12, day: 22 }
        );
    }

    #[test]
    fn open_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_config(dir.path().join("missing.toml")).is_err());
    }
}
