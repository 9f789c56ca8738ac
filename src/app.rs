use chrono::{Days, Local, NaiveDate, NaiveTime};
use ratatui::layout::Position;
use tracing::{debug, info, warn};

use crate::calendar::grid::{self, start_of_month};
use crate::calendar::{DayCell, Reminder, Store, WeekStart};
use crate::components::{MonthHit, MonthLayout, MonthView, ReminderFormState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Dialog,
}

pub struct App {
    pub running: bool,
    pub current_month: NaiveDate,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub month_days: Vec<DayCell>,
    pub dialog: Option<ReminderFormState>,
    /// Index of the picked reminder within the selected day.
    pub selected_reminder: Option<usize>,
    pub show_help: bool,
    pub status_message: Option<String>,
    /// Grid geometry from the last draw, for mouse clicks.
    pub month_layout: MonthLayout,
    pub week_start: WeekStart,
    default_time: NaiveTime,
    store: Store,
}

impl App {
    pub fn new(store: Store, week_start: WeekStart, default_time: NaiveTime, today: NaiveDate) -> Self {
        let mut app = Self {
            running: true,
            current_month: start_of_month(today),
            selected_date: today,
            today,
            month_days: Vec::new(),
            dialog: None,
            selected_reminder: None,
            show_help: false,
            status_message: None,
            month_layout: MonthLayout::default(),
            week_start,
            default_time,
            store,
        };
        app.create_calendar_rows();
        app
    }

    pub fn input_mode(&self) -> InputMode {
        if self.dialog.is_some() {
            InputMode::Dialog
        } else {
            InputMode::Normal
        }
    }

    /// Rebuild the day cells of the displayed month from the store.
    pub fn create_calendar_rows(&mut self) {
        self.month_days =
            grid::build_month(self.current_month, self.today, self.week_start, &self.store);
        let count = self.selected_reminders().len();
        self.selected_reminder = self.selected_reminder.filter(|&i| i < count);
    }

    pub fn selected_cell(&self) -> Option<&DayCell> {
        self.month_days
            .iter()
            .find(|d| d.full_date == self.selected_date)
    }

    pub fn selected_reminders(&self) -> &[Reminder] {
        self.selected_cell()
            .map(|c| c.reminders.as_slice())
            .unwrap_or(&[])
    }

    // ── navigation ──

    pub fn handle_next_month(&mut self) {
        self.shift_month(1);
    }

    pub fn handle_prev_month(&mut self) {
        self.shift_month(-1);
    }

    fn shift_month(&mut self, months: i32) {
        self.current_month = grid::add_months(self.current_month, months);
        self.selected_date = grid::add_months(self.selected_date, months);
        self.selected_reminder = None;
        debug!(month = %self.current_month.format("%Y-%m"), "month changed");
        self.create_calendar_rows();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.select_date(self.today);
        // The date may have rolled over inside the displayed month
        self.create_calendar_rows();
    }

    /// Select a day, switching the displayed month when needed.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.selected_reminder = None;
        if start_of_month(date) != self.current_month {
            self.current_month = start_of_month(date);
            debug!(month = %self.current_month.format("%Y-%m"), "month changed");
            self.create_calendar_rows();
        }
    }

    pub fn next_day(&mut self) {
        self.move_days(1);
    }

    pub fn prev_day(&mut self) {
        self.move_days(-1);
    }

    pub fn next_week(&mut self) {
        self.move_days(7);
    }

    pub fn prev_week(&mut self) {
        self.move_days(-7);
    }

    fn move_days(&mut self, days: i64) {
        let step = Days::new(days.unsigned_abs());
        let target = if days >= 0 {
            self.selected_date.checked_add_days(step)
        } else {
            self.selected_date.checked_sub_days(step)
        };
        if let Some(date) = target {
            self.select_date(date);
        }
    }

    pub fn next_reminder(&mut self) {
        let count = self.selected_reminders().len();
        if count == 0 {
            return;
        }
        self.selected_reminder = Some(match self.selected_reminder {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    pub fn prev_reminder(&mut self) {
        let count = self.selected_reminders().len();
        if count == 0 {
            return;
        }
        self.selected_reminder = Some(match self.selected_reminder {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    // ── dialog ──

    pub fn handle_create_new_reminder(&mut self, date: NaiveDate) {
        self.select_date(date);
        self.dialog = Some(ReminderFormState::new(Reminder::draft(date, self.default_time)));
    }

    pub fn on_reminder_click(&mut self, reminder: Reminder) {
        self.dialog = Some(ReminderFormState::new(reminder));
    }

    /// Open the picked reminder, or a new one when nothing is picked.
    pub fn open_selected(&mut self) {
        let picked = self
            .selected_reminder
            .and_then(|i| self.selected_reminders().get(i).cloned());
        match picked {
            Some(reminder) => self.on_reminder_click(reminder),
            None => self.handle_create_new_reminder(self.selected_date),
        }
    }

    pub fn handle_reminder_dialog_close(&mut self) {
        self.dialog = None;
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut f) = self.dialog {
            f.active_field = f.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut f) = self.dialog {
            f.active_field = f.active_field.prev();
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut f) = self.dialog {
            f.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut f) = self.dialog {
            f.backspace();
        }
    }

    pub fn form_cycle_color(&mut self) {
        if let Some(ref mut f) = self.dialog {
            f.cycle_color();
        }
    }

    pub fn submit_reminder_dialog(&mut self) {
        let Some(form) = self.dialog.as_mut() else {
            return;
        };
        let reminder = match form.to_reminder() {
            Ok(r) => r,
            Err(msg) => {
                form.error = Some(msg);
                return;
            }
        };

        let created = reminder.is_new();
        match self.store.save(reminder) {
            Ok(saved) => {
                info!(id = %saved.id, date = %saved.date, created, "reminder saved");
                self.status_message = Some(format!("Saved \"{}\"", saved.title));
                self.dialog = None;
                self.select_date(saved.full_date);
                self.create_calendar_rows();
                self.selected_reminder = self
                    .selected_reminders()
                    .iter()
                    .position(|r| r.id == saved.id);
            }
            Err(err) => self.report("save reminder", err),
        }
    }

    pub fn delete_reminder_in_dialog(&mut self) {
        let Some(form) = self.dialog.as_ref() else {
            return;
        };
        if form.is_new() {
            return;
        }
        let id = form.original.id.clone();
        let title = form.original.title.clone();

        match self.store.delete(&id) {
            Ok(_) => {
                info!(id = %id, "reminder deleted");
                self.status_message = Some(format!("Deleted \"{}\"", title));
                self.dialog = None;
                self.selected_reminder = None;
                self.create_calendar_rows();
            }
            Err(err) => self.report("delete reminder", err),
        }
    }

    /// Delete the picked reminder of the selected day without opening it.
    pub fn delete_selected_reminder(&mut self) {
        let picked = self
            .selected_reminder
            .and_then(|i| self.selected_reminders().get(i).cloned());
        if let Some(reminder) = picked {
            self.on_reminder_click(reminder);
            self.delete_reminder_in_dialog();
        }
    }

    pub fn delete_all_reminders_at_day(&mut self, date: NaiveDate) {
        match self.store.delete_by_date(date) {
            Ok(0) => self.status_message = Some("Nothing to delete".to_string()),
            Ok(n) => {
                self.status_message = Some(format!(
                    "Deleted {} reminder{} on {}",
                    n,
                    if n == 1 { "" } else { "s" },
                    date.format("%b %d")
                ));
                self.selected_reminder = None;
                self.create_calendar_rows();
            }
            Err(err) => self.report("delete reminders", err),
        }
    }

    // ── mouse ──

    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.dialog.is_some() {
            return;
        }
        let hit = MonthView::hit_test(&self.month_layout, &self.month_days, Position::new(column, row));
        let Some(hit) = hit else {
            return;
        };
        debug!(?hit, "click");

        match hit {
            MonthHit::PrevMonth => self.handle_prev_month(),
            MonthHit::NextMonth => self.handle_next_month(),
            MonthHit::Trash(idx) => {
                if let Some(date) = self.month_days.get(idx).map(|c| c.full_date) {
                    self.delete_all_reminders_at_day(date);
                }
            }
            MonthHit::Reminder(idx, r) => {
                let picked = self
                    .month_days
                    .get(idx)
                    .and_then(|c| c.reminders.get(r).cloned());
                if let Some(reminder) = picked {
                    self.select_date(reminder.full_date);
                    self.selected_reminder = Some(r);
                    self.on_reminder_click(reminder);
                }
            }
            MonthHit::Cell(idx) => {
                if let Some(date) = self.month_days.get(idx).map(|c| c.full_date) {
                    self.handle_create_new_reminder(date);
                }
            }
        }
    }

    fn report(&mut self, action: &str, err: color_eyre::Report) {
        warn!(error = ?err, "failed to {}", action);
        self.status_message = Some(format!("Failed to {}: {}", action, err));
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// Parse a `YYYY-MM` month argument.
pub fn parse_month(s: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app_on(today: NaiveDate) -> App {
        App::new(Store::in_memory(), WeekStart::Sunday, NaiveTime::MIN, today)
    }

    fn add(app: &mut App, on: NaiveDate, title: &str) {
        app.handle_create_new_reminder(on);
        for c in title.chars() {
            app.form_input_char(c);
        }
        app.submit_reminder_dialog();
    }

    #[test]
    fn starts_on_today() {
        let app = app_on(date(2026, 10, 19));
        assert_eq!(app.current_month, date(2026, 10, 1));
        assert_eq!(app.month_days.len(), 35);
        assert!(app.selected_cell().unwrap().is_today);
        assert_eq!(app.input_mode(), InputMode::Normal);
    }

    #[test]
    fn month_navigation_clamps_selected_day() {
        let mut app = app_on(date(2026, 1, 31));
        app.handle_next_month();
        assert_eq!(app.current_month, date(2026, 2, 1));
        assert_eq!(app.selected_date, date(2026, 2, 28));

        app.handle_prev_month();
        app.handle_prev_month();
        assert_eq!(app.current_month, date(2025, 12, 1));
        assert_eq!(app.month_days.first().unwrap().full_date, date(2025, 11, 30));
    }

    #[test]
    fn moving_past_month_edge_switches_month() {
        let mut app = app_on(date(2026, 10, 31));
        app.next_day();
        assert_eq!(app.current_month, date(2026, 11, 1));

        app.prev_week();
        assert_eq!(app.selected_date, date(2026, 10, 25));
        assert_eq!(app.current_month, date(2026, 10, 1));
    }

    #[test]
    fn new_reminder_dialog_flow() {
        let mut app = app_on(date(2026, 10, 19));
        app.handle_create_new_reminder(date(2026, 10, 20));
        assert_eq!(app.input_mode(), InputMode::Dialog);

        // Empty title keeps the dialog open
        app.submit_reminder_dialog();
        assert_eq!(
            app.dialog.as_ref().unwrap().error.as_deref(),
            Some("Title is required")
        );

        app.form_input_char('P');
        app.form_input_char('T');
        app.submit_reminder_dialog();

        assert!(app.dialog.is_none());
        assert_eq!(app.selected_date, date(2026, 10, 20));
        assert_eq!(app.selected_reminders().len(), 1);
        assert_eq!(app.selected_reminders()[0].title, "PT");
        assert_eq!(app.selected_reminder, Some(0));
    }

    #[test]
    fn closing_the_dialog_discards() {
        let mut app = app_on(date(2026, 10, 19));
        app.handle_create_new_reminder(date(2026, 10, 19));
        app.form_input_char('x');
        app.handle_reminder_dialog_close();

        assert!(app.dialog.is_none());
        assert_eq!(app.store().len(), 0);
    }

    #[test]
    fn editing_an_existing_reminder() {
        let mut app = app_on(date(2026, 10, 19));
        add(&mut app, date(2026, 10, 19), "Old");

        app.open_selected();
        app.form_backspace();
        app.form_backspace();
        app.form_backspace();
        for c in "New".chars() {
            app.form_input_char(c);
        }
        app.submit_reminder_dialog();

        assert_eq!(app.store().len(), 1);
        assert_eq!(app.selected_reminders()[0].title, "New");
    }

    #[test]
    fn delete_single_and_whole_day() {
        let mut app = app_on(date(2026, 10, 19));
        add(&mut app, date(2026, 10, 19), "a");
        add(&mut app, date(2026, 10, 19), "b");
        add(&mut app, date(2026, 10, 21), "c");
        assert_eq!(app.store().len(), 3);

        app.select_date(date(2026, 10, 19));
        app.next_reminder();
        app.delete_selected_reminder();
        assert_eq!(app.store().len(), 2);
        assert!(app.dialog.is_none());

        app.delete_all_reminders_at_day(date(2026, 10, 19));
        assert!(app.selected_reminders().is_empty());
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn reminder_picking_wraps() {
        let mut app = app_on(date(2026, 10, 19));
        add(&mut app, date(2026, 10, 19), "a");
        add(&mut app, date(2026, 10, 19), "b");
        app.selected_reminder = None;

        app.prev_reminder();
        assert_eq!(app.selected_reminder, Some(1));
        app.next_reminder();
        assert_eq!(app.selected_reminder, Some(0));
    }

    #[test]
    fn clicks_route_through_the_layout() {
        let mut app = app_on(date(2026, 10, 19));
        add(&mut app, date(2026, 10, 6), "Gym");
        app.month_layout =
            MonthView::layout(ratatui::layout::Rect::new(0, 0, 85, 40), app.month_days.len());

        let idx = app
            .month_days
            .iter()
            .position(|d| d.full_date == date(2026, 10, 6))
            .unwrap();
        let cell = app.month_layout.cells[idx];

        // Reminder line opens the reminder for editing
        app.handle_click(cell.x, cell.y + 1);
        assert!(!app.dialog.as_ref().unwrap().is_new());
        app.handle_reminder_dialog_close();

        // Trash marker clears the day
        app.handle_click(cell.right() - 1, cell.y);
        assert_eq!(app.store().len(), 0);

        // Empty cell area opens a new reminder
        app.handle_click(cell.x, cell.y + 2);
        assert!(app.dialog.as_ref().unwrap().is_new());
        app.handle_reminder_dialog_close();

        let next = app.month_layout.next;
        app.handle_click(next.x, next.y);
        assert_eq!(app.current_month, date(2026, 11, 1));
    }

    #[test]
    fn failed_save_keeps_dialog_and_does_not_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = Store::open(blocker.join("reminders.json")).unwrap();
        let mut app = App::new(store, WeekStart::Sunday, NaiveTime::MIN, date(2026, 10, 19));

        app.handle_create_new_reminder(date(2026, 10, 19));
        app.form_input_char('x');
        app.submit_reminder_dialog();
        app.submit_reminder_dialog();

        assert!(app.dialog.is_some());
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Failed to save reminder")));
        assert_eq!(app.store().len(), 0);
        assert!(app.selected_reminders().is_empty());
    }

    #[test]
    fn today_highlight_follows_the_rebuilt_grid() {
        // A stale "today" from the start of the displayed month
        let real_today = Local::now().date_naive();
        let mut app = app_on(start_of_month(real_today));
        app.go_to_today();

        let marked: Vec<_> = app.month_days.iter().filter(|d| d.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].full_date, real_today);
    }

    #[test]
    fn parses_month_argument() {
        assert_eq!(parse_month("2026-02").unwrap(), date(2026, 2, 1));
        assert!(parse_month("2026-13").is_err());
    }
}
