use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::reminder::{DATE_FORMAT, TIME_FORMAT};
use crate::calendar::Reminder;
use crate::colors;
use crate::theme;

pub const MAX_TITLE_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Date,
    Time,
    City,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::City,
            FormField::City => FormField::Color,
            FormField::Color => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Color,
            FormField::Date => FormField::Title,
            FormField::Time => FormField::Date,
            FormField::City => FormField::Time,
            FormField::Color => FormField::City,
        }
    }
}

/// State of the reminder dialog. Holds the reminder it was opened with so
/// edits keep their id.
#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub original: Reminder,
    pub title: String,
    pub date: String,
    pub time: String,
    pub city: String,
    pub color: String,
    pub active_field: FormField,
    pub error: Option<String>,
}

impl ReminderFormState {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            date: reminder.date.clone(),
            time: reminder.time.clone(),
            city: reminder.city.clone(),
            color: reminder.color.clone(),
            original: reminder,
            active_field: FormField::Title,
            error: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.original.is_new()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, TIME_FORMAT).ok()
    }

    pub fn input_char(&mut self, c: char) {
        self.error = None;
        match self.active_field {
            FormField::Title => {
                if self.title.chars().count() < MAX_TITLE_LEN {
                    self.title.push(c);
                }
            }
            FormField::Date => {
                if (c.is_ascii_digit() || c == '-') && self.date.len() < 10 {
                    self.date.push(c);
                }
            }
            FormField::Time => {
                if (c.is_ascii_digit() || c == ':') && self.time.len() < 5 {
                    self.time.push(c);
                }
            }
            FormField::City => self.city.push(c),
            FormField::Color => {}
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.active_field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
            FormField::City => {
                self.city.pop();
            }
            FormField::Color => {}
        }
    }

    pub fn cycle_color(&mut self) {
        self.color = colors::next_reminder_color(&self.color).to_string();
    }

    /// Build the reminder to save, or explain what is wrong.
    pub fn to_reminder(&self) -> Result<Reminder, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title must be at most {} characters", MAX_TITLE_LEN));
        }
        let full_date = self
            .parsed_date()
            .ok_or_else(|| "Date must be YYYY-MM-DD".to_string())?;
        let time = self
            .parsed_time()
            .ok_or_else(|| "Time must be HH:MM".to_string())?;

        Ok(Reminder {
            id: self.original.id.clone(),
            title: title.to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            date: full_date.format(DATE_FORMAT).to_string(),
            city: self.city.trim().to_string(),
            color: self.color.clone(),
            full_date,
        })
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState) {
        let t = theme::current();

        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(13).max(10);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let accent = colors::to_color(&state.color).unwrap_or(ratatui::style::Color::Green);
        let title = if state.is_new() { " New Reminder " } else { " Edit Reminder " };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // city
            Constraint::Length(1), // color
            Constraint::Length(1), // error
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Title:", &state.title, state.active_field == FormField::Title);
        render_field(frame, rows[1], "Date:", &state.date, state.active_field == FormField::Date);
        render_field(frame, rows[2], "Time:", &state.time, state.active_field == FormField::Time);
        render_field(frame, rows[3], "City:", &state.city, state.active_field == FormField::City);

        let color_name = colors::name_of(&state.color).unwrap_or(state.color.as_str());
        let color_line = Line::from(vec![
            Span::styled(format!("{:<7}", "Color:"), t.dim),
            Span::styled("  ", Style::default().bg(accent)),
            Span::styled(
                format!(" {}", color_name),
                if state.active_field == FormField::Color {
                    Style::default().fg(ratatui::style::Color::Cyan)
                } else {
                    Style::default()
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(color_line), rows[4]);

        if let Some(ref err) = state.error {
            frame.render_widget(Paragraph::new(Span::styled(err.as_str(), t.error)), rows[5]);
        }

        let mut help = vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ];
        if !state.is_new() {
            help.push(Span::styled(" ^D", Style::default().add_modifier(Modifier::BOLD)));
            help.push(Span::styled(":Delete", t.dim));
        }
        frame.render_widget(Paragraph::new(Line::from(help)), rows[6]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
