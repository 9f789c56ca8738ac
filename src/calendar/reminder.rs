use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::colors;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const DAY_KEY_FORMAT: &str = "%d%m%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub time: String,
    pub date: String,
    pub city: String,
    pub color: String,
    pub full_date: NaiveDate,
}

impl Reminder {
    /// The unsaved reminder a day cell starts its dialog with.
    pub fn draft(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            time: time.format(TIME_FORMAT).to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            city: String::new(),
            color: colors::LIGHT_GREEN.to_string(),
            full_date: date,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn day_key(&self) -> String {
        day_key(self.full_date)
    }
}

/// Storage key for a day: `ddMMyyyy`.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}
