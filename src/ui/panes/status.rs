//! Status bar: position in the trace, last message, key hints

use crate::ui::theme::THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: [(&str, &str); 6] = [
    ("←/→", "step"),
    ("1-9", "skip"),
    ("⎵", "play"),
    ("↵/⌫", "end/start"),
    ("Tab", "focus"),
    ("q", "quit"),
];

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    /// Zero-based snapshot index
    pub current_step: usize,
    pub total_steps: usize,
    pub is_error: bool,
    pub is_halted: bool,
    pub is_playing: bool,
}

impl StatusRenderData<'_> {
    /// Short state label shown at the far right, if any
    fn badge(&self) -> Option<(&'static str, Color)> {
        if self.is_playing {
            Some((" ▶ PLAYING ", THEME.highlight))
        } else if self.is_error {
            Some((" FAULT ", THEME.fault))
        } else if self.is_halted {
            Some((" HALTED ", THEME.ok))
        } else if self.current_step + 1 >= self.total_steps {
            // Recording stopped on a limit while the machine was still running
            Some((" TRUNCATED ", THEME.highlight))
        } else {
            None
        }
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar = Style::default().bg(THEME.finger_bg);
    let position_colour = if data.is_error { THEME.fault } else { THEME.accent };

    let left = Line::from(vec![
        Span::styled(
            format!(" {}/{} ", data.current_step + 1, data.total_steps),
            Style::default()
                .bg(position_colour)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", data.message),
            bar.fg(if data.is_error { THEME.fault } else { THEME.text }),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(left).style(bar).alignment(Alignment::Left),
        halves[0],
    );

    let mut right: Vec<Span> = Vec::new();
    for (key, description) in KEY_HINTS {
        right.push(Span::styled(
            format!(" {} ", key),
            Style::default().bg(THEME.muted).fg(Color::Black),
        ));
        right.push(Span::styled(format!(" {} ", description), bar.fg(THEME.text)));
    }
    if let Some((label, colour)) = data.badge() {
        right.push(Span::styled(
            label,
            Style::default()
                .bg(colour)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(current_step: usize, total_steps: usize) -> StatusRenderData<'static> {
        StatusRenderData {
            message: "",
            current_step,
            total_steps,
            is_error: false,
            is_halted: false,
            is_playing: false,
        }
    }

    #[test]
    fn test_badge_priority() {
        assert!(data(0, 10).badge().is_none());
        assert_eq!(data(9, 10).badge().map(|b| b.0), Some(" TRUNCATED "));

        let mut halted = data(9, 10);
        halted.is_halted = true;
        assert_eq!(halted.badge().map(|b| b.0), Some(" HALTED "));

        halted.is_playing = true;
        assert_eq!(halted.badge().map(|b| b.0), Some(" ▶ PLAYING "));
    }
}
