use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::eyre::{bail, Result, WrapErr};
use tracing::{debug, info};

use super::reminder::{day_key, Reminder, DATE_FORMAT};

type Days = BTreeMap<String, Vec<Reminder>>;

/// Reminders keyed by day, persisted as one JSON file.
///
/// Every change is built on a copy of the map and only replaces the live one
/// once it has been written, so a failed write leaves the store untouched.
pub struct Store {
    path: Option<PathBuf>,
    days: Days,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let days = if path.exists() {
            let content = fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read reminders from {}", path.display()))?;
            if content.trim().is_empty() {
                Days::new()
            } else {
                let raw: Days = serde_json::from_str(&content).wrap_err_with(|| {
                    format!("Failed to parse reminders in {}", path.display())
                })?;
                normalize(raw)
                    .wrap_err_with(|| format!("Invalid reminders in {}", path.display()))?
            }
        } else {
            Days::new()
        };

        let store = Self {
            path: Some(path),
            days,
        };
        info!(reminders = store.len(), "opened reminder store");
        Ok(store)
    }

    /// A store that never touches disk.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            days: Days::new(),
        }
    }

    pub fn reminders_for_key(&self, key: &str) -> Vec<Reminder> {
        self.days.get(key).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Insert or replace by id. New reminders get a fresh id.
    pub fn save(&mut self, mut reminder: Reminder) -> Result<Reminder> {
        let mut days = self.days.clone();
        if reminder.is_new() {
            reminder.id = uuid::Uuid::new_v4().to_string();
        } else {
            remove_id(&mut days, &reminder.id);
        }

        let key = reminder.day_key();
        let day = days.entry(key.clone()).or_default();
        day.push(reminder.clone());
        sort_day(day);

        self.commit(days)?;
        debug!(id = %reminder.id, day = %key, "saved reminder");
        Ok(reminder)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut days = self.days.clone();
        if !remove_id(&mut days, id) {
            return Ok(false);
        }
        self.commit(days)?;
        debug!(id, "deleted reminder");
        Ok(true)
    }

    pub fn delete_by_date(&mut self, date: NaiveDate) -> Result<usize> {
        let mut days = self.days.clone();
        let removed = days.remove(&day_key(date)).map_or(0, |day| day.len());
        if removed == 0 {
            return Ok(0);
        }
        self.commit(days)?;
        info!(%date, removed, "deleted reminders for day");
        Ok(removed)
    }

    /// Write `days` to disk, then make it the live map.
    fn commit(&mut self, days: Days) -> Result<()> {
        if let Some(path) = &self.path {
            write_days(path, &days)?;
        }
        self.days = days;
        Ok(())
    }
}

fn remove_id(days: &mut Days, id: &str) -> bool {
    let mut removed = false;
    days.retain(|_, day| {
        let before = day.len();
        day.retain(|r| r.id != id);
        removed |= day.len() != before;
        !day.is_empty()
    });
    removed
}

fn write_days(path: &Path, days: &Days) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(days)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).wrap_err_with(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// File each reminder under its own day, drop empty days, and reject
/// duplicate ids or a `date` that disagrees with `full_date`.
fn normalize(raw: Days) -> Result<Days> {
    let mut ids = HashSet::new();
    let mut days = Days::new();

    for reminder in raw.into_values().flatten() {
        let expected = reminder.full_date.format(DATE_FORMAT).to_string();
        if reminder.date != expected {
            bail!(
                "reminder {} has date {} but full_date {}",
                reminder.id,
                reminder.date,
                expected
            );
        }
        if reminder.id.is_empty() {
            bail!("reminder \"{}\" on {} has no id", reminder.title, reminder.date);
        }
        if !ids.insert(reminder.id.clone()) {
            bail!("duplicate reminder id {}", reminder.id);
        }
        days.entry(reminder.day_key()).or_default().push(reminder);
    }

    for day in days.values_mut() {
        sort_day(day);
    }
    Ok(days)
}

fn sort_day(day: &mut [Reminder]) {
    day.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.title.cmp(&b.title)));
}
