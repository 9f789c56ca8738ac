use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::colors;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Later calls are ignored.
pub fn init(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Get the active theme, falling back to the default preset.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub weekend: Style,
    pub outside_month: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(Color::Rgb(0x5d, 0xb7, 0xde)),
            outside_month: Style::default().fg(Color::Rgb(0x68, 0x68, 0x68)),
            error: Style::default().fg(Color::LightRed),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default().fg(Color::Rgb(248, 248, 242)).bg(Color::Rgb(68, 71, 90)),
            highlight: Style::default().bg(Color::Rgb(68, 71, 90)).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(Color::Rgb(255, 121, 198)),
            outside_month: Style::default().fg(Color::Rgb(98, 114, 164)),
            error: Style::default().fg(Color::Rgb(255, 85, 85)),
        }
    }

    fn gruvbox() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default().fg(Color::Rgb(235, 219, 178)).bg(Color::Rgb(80, 73, 69)),
            highlight: Style::default().bg(Color::Rgb(80, 73, 69)).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(Color::Rgb(254, 128, 25)),
            outside_month: Style::default().fg(Color::Rgb(102, 92, 84)),
            error: Style::default().fg(Color::Rgb(251, 73, 52)),
        }
    }

    fn nord() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default().fg(Color::Rgb(229, 233, 240)).bg(Color::Rgb(67, 76, 94)),
            highlight: Style::default().bg(Color::Rgb(67, 76, 94)).add_modifier(Modifier::BOLD),
            weekend: Style::default().fg(Color::Rgb(129, 161, 193)),
            outside_month: Style::default().fg(Color::Rgb(76, 86, 106)),
            error: Style::default().fg(Color::Rgb(191, 97, 106)),
        }
    }
}

// ── TOML config types ──

/// The `[theme]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub weekend_fg: Option<String>,
    pub outside_fg: Option<String>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg = |style: Style, value: &Option<String>| match value.as_deref().and_then(parse_color) {
            Some(c) => style.fg(c),
            None => style,
        };
        let bg = |style: Style, value: &Option<String>| match value.as_deref().and_then(parse_color) {
            Some(c) => style.bg(c),
            None => style,
        };

        theme.today = bg(fg(theme.today, &self.today_fg), &self.today_bg);
        theme.selected = bg(fg(theme.selected, &self.selected_fg), &self.selected_bg);
        theme.header = fg(theme.header, &self.header_fg);
        theme.dim = fg(theme.dim, &self.dim_fg);
        theme.border = fg(theme.border, &self.border_fg);
        theme.status = bg(fg(theme.status, &self.status_fg), &self.status_bg);
        theme.highlight = bg(theme.highlight, &self.highlight_bg);
        theme.weekend = fg(theme.weekend, &self.weekend_fg);
        theme.outside_month = fg(theme.outside_month, &self.outside_fg);

        theme
    }
}

/// Parse a color string: hex "#rrggbb"/"#rgb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') {
        return colors::to_color(s);
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightblue" => Some(Color::LightBlue),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}
