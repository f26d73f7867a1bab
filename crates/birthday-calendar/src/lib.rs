//! 公暦・農暦の誕生日を判定し、通知メッセージを組み立てるライブラリ。
//!
//! 農暦と公暦の変換は tyme4rs を使用する。
//! 判定は [`LunarCalendar`] トレイト越しに行うため、テストでは任意の対応表に差し替えられる。

pub mod birthday;
pub mod lunar;
pub mod message;
pub mod numeral;
pub mod schedule;
pub mod zodiac;

pub use birthday::{Birthday, BirthdayError, CalendarKind, Occurrence};
pub use lunar::{LunarCalendar, LunarDate, TymeCalendar};
pub use message::format_message;
pub use numeral::{ParseNumeralError, parse_lunar_number};
pub use schedule::{DEFAULT_ADVANCE_DAYS, Person, Reminder, Reminders, collect_reminders};
pub use zodiac::Zodiac;
