use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

pub struct Help;

impl Help {
    pub fn render(frame: &mut Frame, area: Rect) {
        let t = theme::current();

        let popup_w = area.width.min(54).max(30);
        let popup_h = area.height.min(24).max(12);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let entry = |keys: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", keys), key_style),
                Span::raw(desc),
            ])
        };

        let lines = vec![
            Line::from(Span::styled("Navigation", section_style)),
            entry("h/l \u{2190}/\u{2192}", "Previous/next day"),
            entry("j/k \u{2193}/\u{2191}", "Next/previous week"),
            entry("[ / ]", "Previous/next month"),
            entry("t", "Jump to today"),
            Line::from(""),
            Line::from(Span::styled("Reminders", section_style)),
            entry("n", "New reminder on selected day"),
            entry("J / K", "Pick reminder in selected day"),
            entry("Enter o e", "Open picked reminder, else new"),
            entry("x", "Delete picked reminder"),
            entry("D", "Delete all reminders of the day"),
            Line::from(""),
            Line::from(Span::styled("Mouse", section_style)),
            Line::from(Span::styled("  Click a day to add, a reminder to edit,", t.dim)),
            Line::from(Span::styled("  \u{2715} to clear the day, \u{2039} \u{203a} to change month", t.dim)),
            Line::from(""),
            entry("q / Esc", "Quit / close popup"),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn rendered_rows() -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| Help::render(frame, frame.area())).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn enter_is_listed_as_open_not_new() {
        let rows = rendered_rows();
        let enter = rows.iter().find(|r| r.contains("Enter")).unwrap();
        assert!(enter.contains("Open picked reminder"));
        assert!(!enter.contains("New reminder"));

        let new = rows.iter().find(|r| r.contains("New reminder")).unwrap();
        assert!(new.contains(" n "));
    }
}
