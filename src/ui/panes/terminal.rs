//! Console pane: everything the program has written so far

use crate::console::MockTerminal;
use crate::ui::theme::THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the terminal pane
pub struct TerminalScrollState {
    /// First visible line; clamped on render, so `usize::MAX` follows the tail
    pub offset: usize,
}

/// Split output into display lines, escaping bytes that are not printable
fn output_lines(output: &[u8]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut text = String::new();

    let flush_text = |text: &mut String, spans: &mut Vec<Span<'static>>| {
        if !text.is_empty() {
            spans.push(Span::styled(std::mem::take(text), Style::default().fg(THEME.text)));
        }
    };

    for &byte in output {
        match byte {
            b'\n' => {
                flush_text(&mut text, &mut spans);
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            b' '..=b'~' | b'\t' => text.push(byte as char),
            _ => {
                flush_text(&mut text, &mut spans);
                spans.push(Span::styled(
                    format!("\\x{:02x}", byte),
                    Style::default().fg(THEME.muted),
                ));
            }
        }
    }
    flush_text(&mut text, &mut spans);
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the terminal output pane
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    terminal: &MockTerminal,
    is_focused: bool,
    scroll_state: &mut TerminalScrollState,
) {
    let block = Block::default()
        .title(format!(
            " Output ({} bytes, {} unread input) ",
            terminal.output().len(),
            terminal.remaining_input()
        ))
        .borders(Borders::ALL)
        .border_style(THEME.pane_border(is_focused));

    let lines = output_lines(terminal.output());
    if lines.is_empty() {
        let placeholder = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(THEME.muted));
        frame.render_widget(placeholder, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_state.offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}
