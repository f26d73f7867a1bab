mod config;
mod notifier;
mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use birthday_calendar::{TymeCalendar, collect_reminders, format_message};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use tracing::info;

use crate::{
    config::{open_config, write_default_config},
    notifier::Notifier,
    version::short_version,
};

#[derive(Parser)]
#[command(version = short_version())]
struct Args {
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[arg(long)]
    init: bool,

    /// 基準日 (YYYY-MM-DD)。省略時は設定したタイムゾーンでの今日
    #[arg(long)]
    date: Option<NaiveDate>,

    /// 送信せずにメッセージを標準出力に表示する
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.init {
        write_default_config(&args.config)?;
        info!(path = ?args.config, "Created default configuration");
        return Ok(());
    }

    info!(version = short_version(), "birthday-reminder version");

    let config = open_config(&args.config).context("Failed to load configuration")?;
    let people = config.people();
    info!(
        people = people.len(),
        configured = config.people.len(),
        "Configuration loaded"
    );

    let timezone = config.settings.timezone;
    let today = args.date.unwrap_or_else(|| today_in(timezone));
    info!(%today, %timezone, "Checking birthdays");

    let reminders = collect_reminders(
        today,
        &people,
        &config.settings.default_advance_days,
        &TymeCalendar,
    );

    let Some(message) = format_message(&reminders) else {
        info!("No birthday reminders to send");
        return Ok(());
    };

    info!(
        total = reminders.len(),
        today = reminders.today.len(),
        upcoming = reminders.upcoming.len(),
        "Birthday reminders found"
    );

    if args.dry_run {
        println!("{message}");
        return Ok(());
    }

    let notifier = Notifier::from_config(&config.notifier, |key| std::env::var(key).ok())
        .context("Failed to set up notifier")?;
    info!(
        timeout = %humantime::format_duration(config.notifier.timeout()),
        "Sending reminder"
    );

    let receipt = notifier
        .send(&message)
        .await
        .context("Failed to send reminder")?;
    info!(message_id = ?receipt.message_id, "Reminder sent");

    Ok(())
}

/// 指定したタイムゾーンでの今日の日付を取得する。
fn today_in(timezone: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&timezone).date_naive()
}
