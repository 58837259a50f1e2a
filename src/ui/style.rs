use ratatui::style::{Color, Modifier, Style};

use crate::session::CharStatus;

const GOLD: Color = Color::Rgb(255, 215, 0);
const LIGHT_GREEN: Color = Color::Rgb(144, 238, 144);
const LIGHT_PINK: Color = Color::Rgb(255, 182, 193);
const LIGHT_GRAY: Color = Color::Rgb(240, 240, 240);

/// Cell style for a character in the practice window
pub fn char_style(status: CharStatus) -> Style {
    let base = Style::default().fg(Color::Black);
    match status {
        CharStatus::Current => base.bg(GOLD).add_modifier(Modifier::BOLD),
        CharStatus::Correct => base.bg(LIGHT_GREEN),
        CharStatus::Incorrect => base.bg(LIGHT_PINK),
        CharStatus::Pending => base.bg(LIGHT_GRAY).add_modifier(Modifier::DIM),
    }
}

pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn value_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn hint_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}
