//! Register pane rendering
//!
//! Shows all eight registers in hex, decimal and (when printable) as a
//! character. Registers written by the instruction that led to the current
//! snapshot are highlighted.

use crate::memory::registers::RegisterFile;
use crate::ui::theme::THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Printable form of a register's low byte, if it has one
pub(crate) fn char_form(value: u32) -> Option<String> {
    if value > 0xFF {
        return None;
    }
    let byte = value as u8;
    match byte {
        b'\n' => Some("'\\n'".to_string()),
        b' ' => Some("' '".to_string()),
        _ if byte.is_ascii_graphic() => Some(format!("'{}'", byte as char)),
        _ => None,
    }
}

/// Render the register pane
pub fn render_registers_pane(
    frame: &mut Frame,
    area: Rect,
    registers: &RegisterFile,
    previous: Option<&RegisterFile>,
    finger: u32,
    cycle: u64,
    is_focused: bool,
) {
    let border_style = THEME.pane_border(is_focused);

    let block = Block::default()
        .title(" Registers ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let mut items = vec![ListItem::new(Line::from(vec![
        Span::styled("finger ", Style::default().fg(THEME.muted)),
        Span::styled(
            format!("{}", finger),
            Style::default().fg(THEME.highlight),
        ),
        Span::styled("   cycle ", Style::default().fg(THEME.muted)),
        Span::styled(
            format!("{}", cycle),
            Style::default().fg(THEME.highlight),
        ),
    ]))];

    for (index, &value) in registers.values().iter().enumerate() {
        let changed = previous.is_some_and(|prev| prev.values()[index] != value);
        let value_style = if changed {
            Style::default()
                .fg(THEME.changed)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(THEME.literal)
        };

        let mut spans = vec![
            Span::styled(
                format!("r{} ", index),
                Style::default().fg(THEME.register),
            ),
            Span::styled(format!("0x{:08x} ", value), value_style),
            Span::styled(
                format!("{:>10}", value),
                Style::default().fg(THEME.text),
            ),
        ];
        if let Some(c) = char_form(value) {
            spans.push(Span::styled(
                format!(" {}", c),
                Style::default().fg(THEME.muted),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_form() {
        assert_eq!(char_form(72).as_deref(), Some("'H'"));
        assert_eq!(char_form(10).as_deref(), Some("'\\n'"));
        assert_eq!(char_form(0), None);
        assert_eq!(char_form(0x148), None);
    }
}
