use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        let left = match app.input_mode() {
            InputMode::Dialog => " [Reminder] ".to_string(),
            InputMode::Normal => format!(" {} ", app.current_month.format("%b %Y")),
        };

        // Status message if present, otherwise hints that fit
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            match app.input_mode() {
                InputMode::Dialog => " Tab:Next Space:Color Enter:Save Esc:Cancel ".to_string(),
                InputMode::Normal if w >= 90 => {
                    " hjkl:Nav [/]:Month t:Today Enter:New/Open J/K:Pick D:Clear day ?:Help q:Quit "
                        .to_string()
                }
                InputMode::Normal if w >= 50 => " [/]:Month Enter:New ?:Help q:Quit ".to_string(),
                InputMode::Normal => " ?:Help q:Quit ".to_string(),
            }
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));
        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
