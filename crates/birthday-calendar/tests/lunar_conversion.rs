//! tyme4rs を使った実際の農暦変換のテスト
//!
//! 春節・中秋節など日付が広く知られている日で検証する。

use birthday_calendar::{
    Birthday, CalendarKind, LunarCalendar, LunarDate, Person, TymeCalendar, collect_reminders,
    format_message,
};
use chrono::{Days, NaiveDate};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_spring_festival_dates() {
    let calendar = TymeCalendar;

    for (solar, year) in [
        (ymd(2024, 2, 10), 2024),
        (ymd(2025, 1, 29), 2025),
        (ymd(2026, 2, 17), 2026),
    ] {
        assert_eq!(
            calendar.lunar_date(solar),
            Some(LunarDate {
                year,
                month: 1,
                day: 1,
                leap: false,
            }),
            "{solar} should be the first day of the lunar year"
        );
    }
}

#[test]
fn test_mid_autumn_dates() {
    let calendar = TymeCalendar;

    let date = calendar.lunar_date(ymd(2024, 9, 17)).unwrap();
    assert_eq!((date.month, date.day, date.leap), (8, 15, false));

    let date = calendar.lunar_date(ymd(2025, 10, 6)).unwrap();
    assert_eq!((date.month, date.day, date.leap), (8, 15, false));
    assert_eq!(date.to_chinese(), "八月十五");
}

#[test]
fn test_leap_month_detected() {
    // 2025 年は閏六月がある
    let date = TymeCalendar.lunar_date(ymd(2025, 8, 10)).unwrap();
    assert_eq!(date.month, 6);
    assert!(date.leap);
}

#[test]
fn test_dates_outside_conversion_range() {
    let calendar = TymeCalendar;

    // グレゴリオ暦導入で存在しない日
    assert_eq!(calendar.lunar_date(ymd(1582, 10, 10)), None);
    assert_eq!(calendar.lunar_date(ymd(10000, 1, 1)), None);

    let people = vec![Person {
        name: "张三".to_string(),
        birthday: Birthday::parse(CalendarKind::Lunar, "九月-十五").unwrap(),
        advance_days: Some(vec![0, 1]),
    }];
    let reminders = collect_reminders(ymd(1582, 10, 8), &people, &[0], &TymeCalendar);
    assert!(reminders.is_empty());
}

#[test]
fn test_last_month_of_lunar_year_falls_in_january() {
    let date = TymeCalendar.lunar_date(ymd(2025, 1, 28)).unwrap();
    assert_eq!(
        date,
        LunarDate {
            year: 2024,
            month: 12,
            day: 29,
            leap: false,
        }
    );

    let birthday = Birthday::parse(CalendarKind::Lunar, "腊月-廿九").unwrap();
    let occurrence = birthday.occurrence_on(ymd(2025, 1, 28), &TymeCalendar).unwrap();
    assert_eq!(occurrence.display_date, "腊月廿九");
}

#[test]
fn test_thirtieth_day_skipped_in_short_month() {
    // 2024 年の腊月は 29 日まで
    let birthday = Birthday::parse(CalendarKind::Lunar, "腊月-三十").unwrap();
    let start = ymd(2025, 1, 1);

    let matched = (0..60)
        .filter_map(|n| start.checked_add_days(Days::new(n)))
        .any(|date| birthday.occurrence_on(date, &TymeCalendar).is_some());

    assert!(!matched);
}

#[test]
fn test_end_to_end_message() {
    let people = vec![
        Person {
            name: "张三".to_string(),
            birthday: Birthday::parse(CalendarKind::Lunar, "八月-十五").unwrap(),
            advance_days: Some(vec![0, 3]),
        },
        Person {
            name: "李四".to_string(),
            birthday: Birthday::parse(CalendarKind::Solar, "10-3").unwrap(),
            advance_days: None,
        },
    ];

    let reminders = collect_reminders(ymd(2025, 10, 3), &people, &[0], &TymeCalendar);
    let message = format_message(&reminders).unwrap();

    assert_eq!(
        message,
        "🎊 生日提醒 🎊\n\n\
         🎁 今天过生日：\n\
         🎂 📅 李四 (2025-10-03) 公历 | 天秤座\n\
         \n\
         📌 即将过生日：\n\
         ⏰ 🌙 张三 还有3天 (八月十五) 农历\n\
         \n\
         💝 记得送上祝福哦！"
    );
}
