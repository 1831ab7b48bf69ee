//! Maps icon and color classes onto terminal glyphs and colors.

use ratatui::style::Color;

/// Glyph painted for an icon class.
pub fn glyph(icon_class: &str) -> &str {
    match icon_class {
        "fa-x" => "X",
        "fa-o" => "O",
        "fa-chevron-down" => "▾",
        "fa-chevron-up" => "▴",
        other => other.strip_prefix("fa-").unwrap_or(other),
    }
}

/// Terminal color for a color class. Unknown classes fall back to
/// ratatui's color names, then to white.
pub fn color(color_class: &str) -> Color {
    match color_class {
        // older records spell it "turqoise"
        "turquoise" | "turqoise" => Color::Cyan,
        "yellow" => Color::Yellow,
        "" => Color::White,
        other => other.parse().unwrap_or(Color::White),
    }
}
