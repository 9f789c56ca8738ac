use ratatui::style::Color;

pub const BLACK: &str = "#120309";
pub const BLUE: &str = "#5db7de";
pub const MED_BLUE: &str = "#5599b9";
pub const DARK_BLUE: &str = "#28587B";
pub const RED: &str = "#690500";
pub const GREEN: &str = "#4DAA57";
pub const BROWN: &str = "#7a542e";
pub const ORANGE: &str = "#fa9f42";
pub const WHITE: &str = "#f3e9dc";
pub const WHITE_CULTURED: &str = "#f4f4f4";
pub const GRAY: &str = "#686868";
pub const LIGHT_GRAY: &str = "#999";
pub const LIGHTEST_GRAY: &str = "#e5e5e5";
pub const LIGHT_GREEN: &str = "#c8e9a0";

/// Every named color, in declaration order.
pub const PALETTE: [(&str, &str); 14] = [
    ("black", BLACK),
    ("blue", BLUE),
    ("medBlue", MED_BLUE),
    ("darkBlue", DARK_BLUE),
    ("red", RED),
    ("green", GREEN),
    ("brown", BROWN),
    ("orange", ORANGE),
    ("white", WHITE),
    ("whiteCultured", WHITE_CULTURED),
    ("gray", GRAY),
    ("lightestGray", LIGHTEST_GRAY),
    ("lightGray", LIGHT_GRAY),
    ("lightGreen", LIGHT_GREEN),
];

/// Colors offered in the reminder dialog. The default comes first.
pub const REMINDER_COLORS: [&str; 7] = [LIGHT_GREEN, BLUE, GREEN, ORANGE, RED, BROWN, DARK_BLUE];

/// Parse `#rgb` or `#rrggbb` into a terminal color.
pub fn to_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut channels = digits
                .chars()
                .map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Palette name for a hex value, if it is one of ours.
pub fn name_of(hex: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(_, value)| value.eq_ignore_ascii_case(hex))
        .map(|(name, _)| *name)
}

/// The dialog color after `current`. Unknown colors restart the cycle.
pub fn next_reminder_color(current: &str) -> &'static str {
    let pos = REMINDER_COLORS
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current));
    match pos {
        Some(i) => REMINDER_COLORS[(i + 1) % REMINDER_COLORS.len()],
        None => REMINDER_COLORS[0],
    }
}

/// Pick black or white text for legibility on `bg`.
pub fn contrast_fg(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
            if luma > 128_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(to_color(LIGHT_GREEN), Some(Color::Rgb(0xc8, 0xe9, 0xa0)));
        assert_eq!(to_color(DARK_BLUE), Some(Color::Rgb(0x28, 0x58, 0x7b)));
        assert_eq!(to_color(LIGHT_GRAY), Some(Color::Rgb(0x99, 0x99, 0x99)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(to_color("c8e9a0"), None);
        assert_eq!(to_color("#c8e9a"), None);
        assert_eq!(to_color("#zzzzzz"), None);
        assert_eq!(to_color("#"), None);
    }

    #[test]
    fn every_palette_entry_parses() {
        for (name, hex) in PALETTE {
            assert!(to_color(hex).is_some(), "{} did not parse", name);
        }
    }

    #[test]
    fn reminder_colors_cycle() {
        assert_eq!(next_reminder_color(LIGHT_GREEN), BLUE);
        assert_eq!(next_reminder_color(DARK_BLUE), LIGHT_GREEN);
        assert_eq!(next_reminder_color("#000000"), LIGHT_GREEN);
        assert_eq!(next_reminder_color("#C8E9A0"), BLUE);
    }

    #[test]
    fn names_known_colors() {
        assert_eq!(name_of(LIGHT_GREEN), Some("lightGreen"));
        assert_eq!(name_of("#28587b"), Some("darkBlue"));
        assert_eq!(name_of("#123456"), None);
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(contrast_fg(Color::Rgb(0xc8, 0xe9, 0xa0)), Color::Black);
        assert_eq!(contrast_fg(Color::Rgb(0x12, 0x03, 0x09)), Color::White);
    }
}
