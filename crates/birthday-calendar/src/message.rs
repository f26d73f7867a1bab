//! 通知メッセージの組み立て。

use std::fmt::Write as _;

use crate::schedule::{Reminder, Reminders};

const HEADER: &str = "🎊 生日提醒 🎊";
const TODAY_TITLE: &str = "🎁 今天过生日：";
const UPCOMING_TITLE: &str = "📌 即将过生日：";
const FOOTER: &str = "💝 记得送上祝福哦！";

/// リマインダーから通知メッセージを組み立てる。
///
/// 該当者がいなければ `None` を返す。
pub fn format_message(reminders: &Reminders) -> Option<String> {
    if reminders.is_empty() {
        return None;
    }

    let mut message = format!("{HEADER}\n\n");

    if !reminders.today.is_empty() {
        message.push_str(TODAY_TITLE);
        message.push('\n');
        for reminder in &reminders.today {
            message.push_str(&format_line(reminder));
            message.push('\n');
        }
        message.push('\n');
    }

    if !reminders.upcoming.is_empty() {
        message.push_str(UPCOMING_TITLE);
        message.push('\n');
        for reminder in &reminders.upcoming {
            message.push_str(&format_line(reminder));
            message.push('\n');
        }
        message.push('\n');
    }

    message.push_str(FOOTER);
    Some(message)
}

/// 一件分の行を組み立てる。
fn format_line(reminder: &Reminder) -> String {
    let mut line = String::new();

    if reminder.days_ahead == 0 {
        let _ = write!(
            line,
            "🎂 {} {} ({}) {}",
            reminder.kind.emoji(),
            reminder.name,
            reminder.display_date,
            reminder.kind.label()
        );
    } else {
        let _ = write!(
            line,
            "⏰ {} {} 还有{}天 ({}) {}",
            reminder.kind.emoji(),
            reminder.name,
            reminder.days_ahead,
            reminder.display_date,
            reminder.kind.label()
        );
    }

    if let Some(zodiac) = reminder.zodiac {
        let _ = write!(line, " | {zodiac}");
    }

    line
}
