//! 事前通知日数に基づくリマインダーの収集。

use chrono::{Days, NaiveDate};

use crate::birthday::{Birthday, CalendarKind};
use crate::lunar::LunarCalendar;
use crate::zodiac::Zodiac;

/// 個人設定が無いときの事前通知日数（当日のみ）。
pub const DEFAULT_ADVANCE_DAYS: &[u32] = &[0];

/// 通知対象の人物。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub birthday: Birthday,
    /// 個人ごとの事前通知日数。`None` なら全体設定を使う
    pub advance_days: Option<Vec<u32>>,
}

impl Person {
    /// 実際に評価する事前通知日数を、重複を除いて出現順に返す。
    pub fn effective_advance_days(&self, default_days: &[u32]) -> Vec<u32> {
        let days = self.advance_days.as_deref().unwrap_or(default_days);
        let mut distinct = Vec::with_capacity(days.len());
        for &day in days {
            if !distinct.contains(&day) {
                distinct.push(day);
            }
        }
        distinct
    }
}

/// 一件のリマインダー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub name: String,
    pub kind: CalendarKind,
    pub zodiac: Option<Zodiac>,
    /// 誕生日に当たる公暦の日付
    pub date: NaiveDate,
    /// 表示用の日付
    pub display_date: String,
    /// 今日から何日後か
    pub days_ahead: u32,
}

/// 当日分と事前通知分に振り分けたリマインダー。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reminders {
    /// 今日が誕生日（人物の並び順）
    pub today: Vec<Reminder>,
    /// これから誕生日（日付順）
    pub upcoming: Vec<Reminder>,
}

impl Reminders {
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.upcoming.is_empty()
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.upcoming.len()
    }
}

/// `today` を起点に、各人物の事前通知日数ぶん先の日付が誕生日かを調べる。
///
/// # Arguments
/// * `today` - 基準日
/// * `people` - 通知対象の人物
/// * `default_days` - 個人設定が無い人物に適用する事前通知日数
/// * `calendar` - 農暦変換に使うカレンダー
pub fn collect_reminders<C>(
    today: NaiveDate,
    people: &[Person],
    default_days: &[u32],
    calendar: &C,
) -> Reminders
where
    C: LunarCalendar + ?Sized,
{
    let mut reminders = Reminders::default();

    for person in people {
        for days_ahead in person.effective_advance_days(default_days) {
            let Some(target) = today.checked_add_days(Days::new(u64::from(days_ahead))) else {
                tracing::warn!(person = %person.name, days_ahead, "Target date out of range, skipping");
                continue;
            };

            let Some(occurrence) = person.birthday.occurrence_on(target, calendar) else {
                continue;
            };

            tracing::debug!(
                person = %person.name,
                date = %target,
                days_ahead,
                "Birthday matched"
            );

            let reminder = Reminder {
                name: person.name.clone(),
                kind: person.birthday.kind(),
                zodiac: occurrence.zodiac,
                date: target,
                display_date: occurrence.display_date,
                days_ahead,
            };

            if days_ahead == 0 {
                reminders.today.push(reminder);
            } else {
                reminders.upcoming.push(reminder);
            }
        }
    }

    reminders.upcoming.sort_by_key(|r| r.date);
    reminders
}
