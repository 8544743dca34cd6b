//! Program pane rendering with disassembly
//!
//! This module renders the contents of slot 0 as a disassembly listing, one
//! word per row, with the execution finger highlighted.
//!
//! # Features
//!
//! - Offset, raw word and mnemonic form for every instruction
//! - Current instruction highlighting with arrow indicator
//! - Fault highlighting when the trace ended in an error at this instruction
//! - Scroll state that keeps the finger at a fixed visual row while stepping
//!
//! Words that do not decode (opcodes 14 and 15, or data) are shown as `.word`.

use crate::machine::decode::Instruction;
use crate::ui::theme::THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colour a disassembled instruction: mnemonic, registers, literals
fn highlight_disassembly(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, token) in text.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let operand = token.trim_end_matches(',');
        let style = if i == 0 {
            Style::default()
                .fg(THEME.mnemonic)
                .add_modifier(Modifier::BOLD)
        } else if operand.starts_with('r') {
            Style::default().fg(THEME.register)
        } else {
            Style::default().fg(THEME.literal)
        };
        spans.push(Span::styled(token.to_string(), style));
    }
    spans
}

fn disassemble(word: u32, offset: u32) -> Vec<Span<'static>> {
    match Instruction::decode(word, offset) {
        Ok(instruction) => highlight_disassembly(&instruction.to_string()),
        Err(_) => vec![
            Span::styled(".word ", Style::default().fg(THEME.muted)),
            Span::styled(
                format!("0x{:08x}", word),
                Style::default().fg(THEME.literal),
            ),
        ],
    }
}

/// Scroll state for the program pane
pub struct ProgramScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &[u32],
    finger: u32,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut ProgramScrollState,
) {
    let border_style = THEME.pane_border(is_focused);

    let block = Block::default()
        .title(format!(" Program ({} words) ", program.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = program.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the finger at the target visual row
    let current = finger as usize;
    scroll_state.offset = current.saturating_sub(target_row);
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let mut lines: Vec<Line> = program
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, &word)| {
            let is_current = idx == current;
            let marker = if is_current { "▶" } else { " " };
            let prefix = format!("{}{:6} {:08x}  ", marker, idx, word);

            let spans = if is_current && is_error {
                // ERROR LINE: red background, no syntax colours
                let text = match Instruction::decode(word, idx as u32) {
                    Ok(instruction) => instruction.to_string(),
                    Err(_) => format!(".word 0x{:08x}", word),
                };
                let style = Style::default()
                    .bg(THEME.fault)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                vec![Span::styled(prefix, style), Span::styled(text, style)]
            } else if is_current {
                let mut spans = vec![Span::styled(
                    prefix,
                    Style::default()
                        .fg(THEME.highlight)
                        .add_modifier(Modifier::BOLD),
                )];
                spans.extend(disassemble(word, idx as u32));
                for span in &mut spans {
                    span.style = span.style.bg(THEME.finger_bg);
                }
                spans
            } else {
                let mut spans = vec![Span::styled(
                    prefix,
                    Style::default().fg(THEME.muted),
                )];
                spans.extend(disassemble(word, idx as u32));
                spans
            };

            Line::from(spans)
        })
        .collect();

    if current >= total_lines {
        // The finger ran off the end of the program
        lines.push(Line::from(Span::styled(
            format!("▶{:6} <end of program>", current),
            Style::default()
                .fg(THEME.fault)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_splits_operands() {
        let spans = highlight_disassembly("add r0, r1, r2");
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "add r0, r1, r2");
        assert_eq!(spans[0].style.fg, Some(THEME.mnemonic));
        assert_eq!(spans[2].style.fg, Some(THEME.register));
    }

    #[test]
    fn test_undecodable_word_shown_as_data() {
        let spans = disassemble(0xF000_0001, 0);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, ".word 0xf0000001");
    }
}
