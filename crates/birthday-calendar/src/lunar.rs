//! 農暦と公暦の変換。
//!
//! 変換そのものは tyme4rs に任せ、このモジュールでは
//! 判定に必要な値（年・月・日・閏月かどうか）だけを取り出す。

use chrono::{Datelike, NaiveDate};
use tyme4rs::tyme::solar::SolarDay;

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// 農暦の日付。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// 農暦年
    pub year: i32,
    /// 月 (1〜12)
    pub month: u32,
    /// 日 (1〜30)
    pub day: u32,
    /// 閏月かどうか
    pub leap: bool,
}

impl LunarDate {
    /// `十月十六`、`腊月初八`、`闰四月十五` のような表記を返す。
    pub fn to_chinese(&self) -> String {
        let leap = if self.leap { "闰" } else { "" };
        format!(
            "{}{}月{}",
            leap,
            month_name(self.month).unwrap_or("?"),
            day_name(self.day).unwrap_or("?")
        )
    }
}

/// 公暦の日付を農暦に変換するカレンダー。
pub trait LunarCalendar {
    /// `date` に対応する農暦の日付を返す。対応範囲外なら `None`。
    fn lunar_date(&self, date: NaiveDate) -> Option<LunarDate>;
}

/// tyme4rs による農暦カレンダー。
#[derive(Debug, Clone, Copy, Default)]
pub struct TymeCalendar;

impl LunarCalendar for TymeCalendar {
    fn lunar_date(&self, date: NaiveDate) -> Option<LunarDate> {
        if !(1..=9999).contains(&date.year()) {
            return None;
        }

        // グレゴリオ暦への切り替えで欠けた日 (1582-10-05〜14) は tyme4rs 側でエラーになる
        let solar = SolarDay::new(date.year() as _, date.month() as _, date.day() as _).ok()?;
        let lunar_day = solar.get_lunar_day();
        let lunar_month = lunar_day.get_lunar_month();

        Some(LunarDate {
            year: i32::try_from(lunar_month.get_year()).ok()?,
            month: u32::try_from(lunar_month.get_month()).ok()?,
            day: u32::try_from(lunar_day.get_day()).ok()?,
            leap: lunar_month.is_leap(),
        })
    }
}

/// 月の名前（`正`〜`腊`）。
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// 日の名前（`初一`〜`三十`）。
pub fn day_name(day: u32) -> Option<&'static str> {
    let index = usize::try_from(day).ok()?.checked_sub(1)?;
    DAY_NAMES.get(index).copied()
}
