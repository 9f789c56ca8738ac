use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::Reminder;
use crate::colors;
use crate::components::month_view::truncate;
use crate::theme;

/// Reminders of the selected day, beside the grid.
pub struct DayPanel;

impl DayPanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        reminders: &[Reminder],
        selected_index: usize,
    ) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let count_str = match reminders.len() {
            0 => String::new(),
            1 => " 1 reminder ".to_string(),
            n => format!(" {} reminders ", n),
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count_str, t.dim)))
            .borders(Borders::ALL)
            .border_style(t.border);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders\n\nEnter: add one").style(t.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = reminders
            .iter()
            .enumerate()
            .map(|(i, r)| format_reminder(r, inner_w, i == selected_index))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn format_reminder(rem: &Reminder, max_width: usize, selected: bool) -> ListItem<'static> {
    let t = theme::current();
    let swatch = colors::to_color(&rem.color).unwrap_or(ratatui::style::Color::Gray);

    let title_style = if selected { t.selected } else { Style::default() };
    let time_span = Span::styled(format!(" {} ", rem.time), Style::default().add_modifier(Modifier::DIM));

    let used = 2 + rem.time.len() + 2;
    let mut spans = vec![
        Span::styled("  ", Style::default().bg(swatch)),
        time_span,
        Span::styled(truncate(&rem.title, max_width.saturating_sub(used)), title_style),
    ];

    // City only if there's room
    let used = used + rem.title.chars().count();
    if !rem.city.is_empty() && used + 3 + rem.city.chars().count() <= max_width {
        spans.push(Span::styled(format!(" @ {}", rem.city), t.dim));
    }

    ListItem::new(Line::from(spans))
}
