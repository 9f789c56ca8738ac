use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{DayCell, Reminder, WeekStart};
use crate::colors;
use crate::theme;

const TRASH: &str = "\u{2715}";

/// Screen geometry of the month grid, shared by drawing and mouse hit tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthLayout {
    pub prev: Rect,
    pub next: Rect,
    pub cells: Vec<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthHit {
    PrevMonth,
    NextMonth,
    /// The delete-all marker of a cell.
    Trash(usize),
    /// A reminder line: cell index, reminder index.
    Reminder(usize, usize),
    /// Anywhere else inside a cell.
    Cell(usize),
}

pub struct MonthView;

impl MonthView {
    /// Split `area` into header, weekday row and a 7-column grid.
    /// Returns the inner area rows alongside the layout.
    fn split(area: Rect, cell_count: usize) -> (Rect, Rect, MonthLayout) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);

        let rows = Layout::vertical([
            Constraint::Length(1), // month header
            Constraint::Length(1), // weekday names
            Constraint::Min(0),
        ])
        .split(inner);

        let header = rows[0];
        let prev = Rect::new(header.x, header.y, 3.min(header.width), header.height);
        let next = Rect::new(
            header.right().saturating_sub(3),
            header.y,
            3.min(header.width),
            header.height,
        );

        let weeks = cell_count.div_ceil(7).max(1);
        let week_rows = Layout::vertical(vec![Constraint::Ratio(1, weeks as u32); weeks]).split(rows[2]);

        let mut cells = Vec::with_capacity(cell_count);
        for row in week_rows.iter() {
            let cols = Layout::horizontal([Constraint::Ratio(1, 7); 7])
                .spacing(1)
                .split(*row);
            cells.extend(cols.iter().copied());
        }
        cells.truncate(cell_count);

        (header, rows[1], MonthLayout { prev, next, cells })
    }

    #[cfg(test)]
    pub fn layout(area: Rect, cell_count: usize) -> MonthLayout {
        Self::split(area, cell_count).2
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        month: NaiveDate,
        days: &[DayCell],
        selected_date: NaiveDate,
        selected_reminder: Option<usize>,
        week_start: WeekStart,
    ) -> MonthLayout {
        let t = theme::current();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border);
        frame.render_widget(block, area);

        let (header, weekday_row, layout) = Self::split(area, days.len());

        // Month header: ‹ October 2026 ›
        frame.render_widget(
            Paragraph::new(format!("{:^width$}", month.format("%B %Y").to_string(), width = header.width as usize))
                .style(t.header),
            header,
        );
        frame.render_widget(Paragraph::new(" \u{2039} ").style(t.header), layout.prev);
        frame.render_widget(Paragraph::new(" \u{203a} ").style(t.header), layout.next);

        // Weekday names, aligned with the first grid row
        let names = week_start.day_names();
        for (i, cell) in layout.cells.iter().take(7).enumerate() {
            let r = Rect::new(cell.x, weekday_row.y, cell.width, 1);
            frame.render_widget(
                Paragraph::new(format!("{:^width$}", names[i], width = cell.width as usize)).style(t.header),
                r,
            );
        }

        for (day, rect) in days.iter().zip(layout.cells.iter()) {
            let is_selected = day.full_date == selected_date;
            render_cell(frame, *rect, day, is_selected, selected_reminder.filter(|_| is_selected));
        }

        layout
    }

    pub fn hit_test(layout: &MonthLayout, days: &[DayCell], pos: Position) -> Option<MonthHit> {
        if layout.prev.contains(pos) {
            return Some(MonthHit::PrevMonth);
        }
        if layout.next.contains(pos) {
            return Some(MonthHit::NextMonth);
        }

        let (idx, rect) = layout
            .cells
            .iter()
            .enumerate()
            .find(|(_, r)| r.contains(pos))?;
        let day = days.get(idx)?;

        if pos.y == rect.y {
            if has_trash_marker(day, rect.width) && pos.x == rect.right().saturating_sub(1) {
                return Some(MonthHit::Trash(idx));
            }
            return Some(MonthHit::Cell(idx));
        }

        let line = (pos.y - rect.y - 1) as usize;
        let (shown, _) = visible_reminders(day.reminders.len(), rect.height);
        if line < shown {
            return Some(MonthHit::Reminder(idx, line));
        }
        Some(MonthHit::Cell(idx))
    }
}

/// The delete-all marker is drawn only on days with reminders and room for it.
fn has_trash_marker(day: &DayCell, cell_width: u16) -> bool {
    !day.reminders.is_empty() && cell_width >= 4
}

/// How many reminder lines fit under the day number, and how many overflow.
fn visible_reminders(total: usize, cell_height: u16) -> (usize, usize) {
    let lines = cell_height.saturating_sub(1) as usize;
    if total <= lines {
        (total, 0)
    } else {
        // Keep the last line for the "+N" marker
        let shown = lines.saturating_sub(1);
        (shown, total - shown)
    }
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    day: &DayCell,
    is_selected: bool,
    selected_reminder: Option<usize>,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let t = theme::current();
    let w = area.width as usize;

    let base = if !day.is_within_current_month {
        t.outside_month
    } else if day.is_weekend {
        t.weekend
    } else {
        Style::default()
    };

    let number_style = if is_selected && day.is_today {
        t.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if is_selected {
        t.selected
    } else if day.is_today {
        t.today
    } else {
        base
    };

    let mut header = vec![Span::styled(format!("{:>2}", day.day), number_style)];
    if has_trash_marker(day, area.width) {
        header.push(Span::raw(" ".repeat(w - 3)));
        header.push(Span::styled(TRASH, t.dim));
    }

    let mut lines = vec![Line::from(header)];
    let (shown, hidden) = visible_reminders(day.reminders.len(), area.height);
    for (i, reminder) in day.reminders.iter().take(shown).enumerate() {
        lines.push(reminder_line(reminder, w, selected_reminder == Some(i)));
    }
    if hidden > 0 {
        lines.push(Line::from(Span::styled(format!("+{} more", hidden), t.dim)));
    }

    let style = if is_selected { t.highlight } else { Style::default() };
    frame.render_widget(Paragraph::new(lines).style(style), area);
}

fn reminder_line(reminder: &Reminder, width: usize, selected: bool) -> Line<'static> {
    let bg = colors::to_color(&reminder.color).unwrap_or(ratatui::style::Color::Gray);
    let mut style = Style::default().bg(bg).fg(colors::contrast_fg(bg));
    if selected {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    // "title  09:00", dropping the time when the cell is narrow
    let time = &reminder.time;
    let text = if width >= time.len() + 4 {
        let title_w = width - time.len() - 1;
        format!("{:<title_w$} {}", truncate(&reminder.title, title_w), time)
    } else {
        format!("{:<width$}", truncate(&reminder.title, width))
    };

    Line::from(Span::styled(text, style))
}

pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else if max > 1 {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('\u{2026}');
        out
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::calendar::{grid, Store};

    fn october() -> (NaiveDate, Vec<DayCell>) {
        let mut store = Store::in_memory();
        let day = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        for (title, time) in [("Gym", "07:00"), ("Dentist", "15:00")] {
            let mut r = Reminder::draft(day, NaiveTime::MIN);
            r.title = title.to_string();
            r.time = time.to_string();
            store.save(r).unwrap();
        }
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        (today, grid::build_month(today, today, WeekStart::Sunday, &store))
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("Café com leite", 5), "Café\u{2026}");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn overflow_keeps_a_marker_line() {
        assert_eq!(visible_reminders(2, 4), (2, 0));
        assert_eq!(visible_reminders(5, 4), (2, 3));
        assert_eq!(visible_reminders(3, 1), (0, 3));
    }

    #[test]
    fn layout_has_one_rect_per_day() {
        let layout = MonthView::layout(Rect::new(0, 0, 85, 40), 35);
        assert_eq!(layout.cells.len(), 35);
        // Rows line up
        assert_eq!(layout.cells[0].y, layout.cells[6].y);
        assert!(layout.cells[7].y > layout.cells[0].y);
    }

    #[test]
    fn hit_testing_finds_trash_reminders_and_cells() {
        let (_, days) = october();
        let layout = MonthView::layout(Rect::new(0, 0, 85, 40), days.len());
        let idx = days
            .iter()
            .position(|d| d.day == 6 && d.is_within_current_month)
            .unwrap();
        let cell = layout.cells[idx];

        let trash = Position::new(cell.right() - 1, cell.y);
        assert_eq!(MonthView::hit_test(&layout, &days, trash), Some(MonthHit::Trash(idx)));

        let second = Position::new(cell.x, cell.y + 2);
        assert_eq!(MonthView::hit_test(&layout, &days, second), Some(MonthHit::Reminder(idx, 1)));

        let empty = Position::new(cell.x, cell.bottom() - 1);
        assert_eq!(MonthView::hit_test(&layout, &days, empty), Some(MonthHit::Cell(idx)));

        let prev = Position::new(layout.prev.x, layout.prev.y);
        assert_eq!(MonthView::hit_test(&layout, &days, prev), Some(MonthHit::PrevMonth));
    }

    #[test]
    fn narrow_cells_have_no_trash_target() {
        let (_, days) = october();
        // 7 columns of 3 with 6 gaps, plus borders
        let layout = MonthView::layout(Rect::new(0, 0, 29, 40), days.len());
        let idx = days
            .iter()
            .position(|d| d.day == 6 && d.is_within_current_month)
            .unwrap();
        let cell = layout.cells[idx];
        assert!(cell.width < 4);

        let corner = Position::new(cell.right() - 1, cell.y);
        assert_eq!(MonthView::hit_test(&layout, &days, corner), Some(MonthHit::Cell(idx)));
    }

    #[test]
    fn renders_month_title_and_reminders() {
        let (today, days) = october();
        let mut terminal = Terminal::new(TestBackend::new(85, 40)).unwrap();
        terminal
            .draw(|frame| {
                MonthView::render(frame, frame.area(), today, &days, today, None, WeekStart::Sunday);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("October 2026"));
        assert!(text.contains("Gym"));
        assert!(text.contains("15:00"));
    }
}
