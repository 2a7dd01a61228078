use focos_dashboard::domain::{hex_to_rgb, Risk};
use ratatui::style::{Color, Modifier, Style};

/// Terminal colour for a `#RRGGBB` palette entry; gray when malformed.
pub fn hex_color(hex: &str) -> Color {
    hex_to_rgb(hex).map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b))
}

/// Badge style for a risk cell.
pub fn risk_style(risk: Risk) -> Style {
    Style::default()
        .fg(hex_color(risk.color()))
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_entries_become_rgb() {
        assert_eq!(hex_color("#9C27B0"), Color::Rgb(0x9C, 0x27, 0xB0));
        assert_eq!(hex_color("nope"), Color::Gray);
        assert_eq!(risk_style(Risk::Low).fg, Some(Color::Rgb(0x4C, 0xAF, 0x50)));
    }
}
