//! 誕生日の表現と、ある日付が誕生日に当たるかの判定。

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::lunar::LunarCalendar;
use crate::numeral::{ParseNumeralError, parse_lunar_number};
use crate::zodiac::Zodiac;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BirthdayError {
    #[error("Unknown calendar kind: {0}")]
    UnknownCalendar(String),

    #[error("Birthday must be written as <month>-<day>: {0}")]
    Format(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid lunar numeral: {0}")]
    Numeral(#[from] ParseNumeralError),

    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),

    #[error("Day out of range: {month}-{day}")]
    DayOutOfRange { month: u32, day: u32 },
}

/// 誕生日を記録している暦の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    /// 公暦
    Solar,
    /// 農暦
    Lunar,
}

impl CalendarKind {
    /// メッセージ上の表記（`公历` / `农历`）。
    pub fn label(self) -> &'static str {
        match self {
            CalendarKind::Solar => "公历",
            CalendarKind::Lunar => "农历",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CalendarKind::Solar => "📅",
            CalendarKind::Lunar => "🌙",
        }
    }
}

impl FromStr for CalendarKind {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solar" | "公历" => Ok(CalendarKind::Solar),
            "lunar" | "农历" => Ok(CalendarKind::Lunar),
            _ => Err(BirthdayError::UnknownCalendar(s.to_string())),
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 誕生日（年を含まない月日）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Birthday {
    Solar { month: u32, day: u32 },
    Lunar { month: u32, day: u32 },
}

/// ある日付に誕生日が当たったときの情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// メッセージに表示する日付（公暦は `YYYY-MM-DD`、農暦は `十月十六` 形式）
    pub display_date: String,
    /// 星座（公暦の誕生日のみ）
    pub zodiac: Option<Zodiac>,
}

impl Birthday {
    /// `"10-16"` や `"腊月-廿二"` のような `<月>-<日>` 表記を解析する。
    ///
    /// 農暦の場合、月日はそれぞれ漢数字・算用数字のどちらでもよい。
    pub fn parse(kind: CalendarKind, text: &str) -> Result<Self, BirthdayError> {
        let (month, day) = text
            .split_once('-')
            .map(|(m, d)| (m.trim(), d.trim()))
            .ok_or_else(|| BirthdayError::Format(text.to_string()))?;

        match kind {
            CalendarKind::Solar => {
                let month = parse_decimal(month)?;
                let day = parse_decimal(day)?;
                if !(1..=12).contains(&month) {
                    return Err(BirthdayError::MonthOutOfRange(month));
                }
                // 2000 年は閏年なので 2-29 も有効とみなす
                if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                    return Err(BirthdayError::DayOutOfRange { month, day });
                }
                Ok(Birthday::Solar { month, day })
            }
            CalendarKind::Lunar => {
                let month = parse_lunar_number(month)?;
                let day = parse_lunar_number(day)?;
                if !(1..=12).contains(&month) {
                    return Err(BirthdayError::MonthOutOfRange(month));
                }
                if !(1..=30).contains(&day) {
                    return Err(BirthdayError::DayOutOfRange { month, day });
                }
                Ok(Birthday::Lunar { month, day })
            }
        }
    }

    pub fn kind(&self) -> CalendarKind {
        match self {
            Birthday::Solar { .. } => CalendarKind::Solar,
            Birthday::Lunar { .. } => CalendarKind::Lunar,
        }
    }

    /// `date` がこの誕生日に当たるかを判定する。
    ///
    /// 公暦の 2 月 29 日生まれは平年では 2 月 28 日に祝う。
    /// 農暦は閏月を対象外とし、30 日生まれは小の月の年には当たらない。
    pub fn occurrence_on<C>(&self, date: NaiveDate, calendar: &C) -> Option<Occurrence>
    where
        C: LunarCalendar + ?Sized,
    {
        match *self {
            Birthday::Solar { month, day } => {
                let observed_day = if month == 2 && day == 29 && !is_leap_year(date.year()) {
                    28
                } else {
                    day
                };
                if date.month() != month || date.day() != observed_day {
                    return None;
                }
                Some(Occurrence {
                    display_date: date.format("%Y-%m-%d").to_string(),
                    zodiac: Zodiac::from_month_day(month, day),
                })
            }
            Birthday::Lunar { month, day } => {
                let lunar = calendar.lunar_date(date)?;
                if lunar.leap || lunar.month != month || lunar.day != day {
                    return None;
                }
                Some(Occurrence {
                    display_date: lunar.to_chinese(),
                    zodiac: None,
                })
            }
        }
    }
}

fn parse_decimal(s: &str) -> Result<u32, BirthdayError> {
    s.parse()
        .map_err(|_| BirthdayError::InvalidNumber(s.to_string()))
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
