use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Deserialize;

use super::reminder::{day_key, Reminder};
use super::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Short weekday names in grid column order.
    pub fn day_names(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub full_date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_within_current_month: bool,
    pub reminders: Vec<Reminder>,
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = start_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

pub fn start_of_week(date: NaiveDate, start: WeekStart) -> NaiveDate {
    date.week(start.first_day()).first_day()
}

pub fn end_of_week(date: NaiveDate, start: WeekStart) -> NaiveDate {
    date.week(start.first_day()).last_day()
}

/// Shift by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every day from the start of the week holding the 1st to the end of the
/// week holding the month's last day.
pub fn build_month(
    month: NaiveDate,
    today: NaiveDate,
    week_start: WeekStart,
    store: &Store,
) -> Vec<DayCell> {
    let month_start = start_of_month(month);
    let month_end = end_of_month(month_start);
    let start_date = start_of_week(month_start, week_start);
    let end_date = end_of_week(month_end, week_start);
    let today_key = day_key(today);

    let mut days = Vec::with_capacity(42);
    let mut current = start_date;

    while current <= end_date {
        let key = day_key(current);
        days.push(DayCell {
            full_date: current,
            day: current.day(),
            is_today: key == today_key,
            is_weekend: is_weekend(current),
            is_within_current_month: (month_start..=month_end).contains(&current),
            reminders: store.reminders_for_key(&key),
        });

        match current.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_spans_whole_weeks_around_the_month() {
        let store = Store::in_memory();
        // October 2026 starts on a Thursday and ends on a Saturday.
        let days = build_month(date(2026, 10, 19), date(2026, 10, 19), WeekStart::Sunday, &store);

        assert_eq!(days.len(), 35);
        assert_eq!(days.first().unwrap().full_date, date(2026, 9, 27));
        assert_eq!(days.last().unwrap().full_date, date(2026, 10, 31));
        assert_eq!(days.first().unwrap().full_date.weekday(), Weekday::Sun);
    }

    #[test]
    fn monday_start_shifts_the_grid() {
        let store = Store::in_memory();
        let days = build_month(date(2026, 10, 1), date(2026, 10, 19), WeekStart::Monday, &store);

        assert_eq!(days.first().unwrap().full_date, date(2026, 9, 28));
        assert_eq!(days.last().unwrap().full_date, date(2026, 11, 1));
        assert_eq!(days.len() % 7, 0);
    }

    #[test]
    fn grid_length_is_always_whole_weeks() {
        let store = Store::in_memory();
        // February 2026 fits exactly in four Sunday-first weeks.
        let feb = build_month(date(2026, 2, 1), date(2026, 2, 1), WeekStart::Sunday, &store);
        assert_eq!(feb.len(), 28);

        for month in 1..=12 {
            let days = build_month(date(2027, month, 15), date(2027, 1, 1), WeekStart::Sunday, &store);
            assert_eq!(days.len() % 7, 0);
            assert!(days.len() >= 28 && days.len() <= 42);
            assert!(days.iter().any(|d| d.full_date == date(2027, month, 1)));
        }
    }

    #[test]
    fn cell_flags() {
        let store = Store::in_memory();
        let days = build_month(date(2026, 10, 1), date(2026, 10, 19), WeekStart::Sunday, &store);

        let today: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day, 19);

        let sep = days.iter().find(|d| d.full_date == date(2026, 9, 27)).unwrap();
        assert!(!sep.is_within_current_month);
        assert!(sep.is_weekend);

        let thu = days.iter().find(|d| d.full_date == date(2026, 10, 1)).unwrap();
        assert!(thu.is_within_current_month);
        assert!(!thu.is_weekend);
    }

    #[test]
    fn cells_carry_their_own_reminders() {
        let mut store = Store::in_memory();
        let mut r = Reminder::draft(date(2026, 10, 5), NaiveTime::MIN);
        r.title = "gym".to_string();
        store.save(r).unwrap();

        let days = build_month(date(2026, 10, 1), date(2026, 10, 19), WeekStart::Sunday, &store);
        for cell in &days {
            assert!(cell.reminders.iter().all(|r| r.full_date == cell.full_date));
        }
        let fifth = days.iter().find(|d| d.day == 5 && d.is_within_current_month).unwrap();
        assert_eq!(fifth.reminders.len(), 1);
    }

    #[test]
    fn month_arithmetic_clamps() {
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(add_months(date(2028, 1, 31), 1), date(2028, 2, 29));
        assert_eq!(add_months(date(2026, 3, 31), -1), date(2026, 2, 28));
        assert_eq!(add_months(date(2026, 12, 15), 1), date(2027, 1, 15));
        assert_eq!(end_of_month(date(2026, 12, 3)), date(2026, 12, 31));
        assert_eq!(start_of_month(date(2026, 12, 3)), date(2026, 12, 1));
    }
}
