//! Colour palette shared by every pane

use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub text: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub ok: Color,
    pub fault: Color,
    pub mnemonic: Color,
    pub literal: Color,
    pub register: Color,
    /// Registers written by the instruction just executed
    pub changed: Color,
    pub focus_border: Color,
    pub idle_border: Color,
    /// Background of the row under the execution finger
    pub finger_bg: Color,
}

impl Theme {
    /// Border style for a pane, bold when it has focus
    pub fn pane_border(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.focus_border)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.idle_border)
        }
    }
}

pub const THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    highlight: Color::Rgb(250, 179, 135),
    muted: Color::Rgb(108, 112, 134),
    ok: Color::Rgb(166, 227, 161),
    fault: Color::Rgb(243, 139, 168),
    mnemonic: Color::Rgb(203, 166, 247),
    literal: Color::Rgb(250, 179, 135),
    register: Color::Rgb(148, 226, 213),
    changed: Color::Rgb(245, 194, 231),
    focus_border: Color::Rgb(249, 226, 175),
    idle_border: Color::Rgb(108, 112, 134),
    finger_bg: Color::Rgb(50, 50, 70),
};
