//! Palette and the fixed lookup tables for type badges and stat bars.

use ratatui::style::Color;

pub const BG_PANEL: Color = Color::Rgb(18, 26, 40);
pub const TEXT_MAIN: Color = Color::Rgb(230, 238, 244);
pub const TEXT_DIM: Color = Color::Rgb(150, 168, 184);
pub const ACCENT: Color = Color::Rgb(86, 196, 188);
pub const ACCENT_GOLD: Color = Color::Rgb(232, 184, 96);
pub const ERROR_FG: Color = Color::Rgb(214, 108, 108);

/// Type badge icons. Unmapped types get no icon, only the text tag.
const TYPE_ICONS: &[(&str, &str)] = &[
    ("normal", "●"),
    ("fire", "🔥"),
    ("water", "💧"),
    ("grass", "🌿"),
    ("electric", "⚡"),
    ("ice", "❄"),
    ("fighting", "🥊"),
    ("poison", "☠"),
    ("ground", "⛰"),
    ("flying", "🪶"),
    ("psychic", "🔮"),
    ("bug", "🐛"),
    ("rock", "🗿"),
    ("ghost", "👻"),
    ("dragon", "🐉"),
    ("dark", "🌙"),
    ("steel", "⚙"),
    ("fairy", "✨"),
];

pub fn type_icon(type_name: &str) -> Option<&'static str> {
    TYPE_ICONS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, icon)| *icon)
}

/// Fallback for stat names not in the table.
pub const STAT_COLOR_DEFAULT: Color = Color::Rgb(128, 128, 128);

/// Stat bar colors, one fixed entry per known base stat.
const STAT_COLORS: &[(&str, Color)] = &[
    ("hp", Color::Rgb(0xff, 0x6b, 0x6b)),
    ("attack", Color::Rgb(0xf0, 0x9a, 0x4e)),
    ("defense", Color::Rgb(0xf2, 0xd0, 0x5e)),
    ("special-attack", Color::Rgb(0x6d, 0xa9, 0xf7)),
    ("special-defense", Color::Rgb(0x7c, 0xd6, 0x92)),
    ("speed", Color::Rgb(0xd8, 0x90, 0xf5)),
];

pub fn stat_color(stat_name: &str) -> Color {
    STAT_COLORS
        .iter()
        .find(|(name, _)| *name == stat_name)
        .map(|(_, color)| *color)
        .unwrap_or(STAT_COLOR_DEFAULT)
}

/// Short uppercase labels for the stat panel.
pub fn stat_label(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

/// `mr-mime` -> `Mr Mime`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
