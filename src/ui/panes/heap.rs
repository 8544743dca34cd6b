//! Heap pane rendering with live arrays and word dumps
//!
//! This module renders the heap pane, listing every live array with its
//! identifier, its length and a short hex dump of its leading words.
//!
//! # Features
//!
//! - Program slot summary (slot 0)
//! - One entry per live array, ascending by identifier
//! - Hex dump of up to [`WORDS_PER_ROW`] words per array
//! - Fault highlighting for the array named by a bounds or liveness fault
//! - Scroll support for large heaps

use crate::memory::heap::Heap;
use crate::ui::theme::THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Words shown per array before eliding the rest
pub const WORDS_PER_ROW: usize = 4;

/// Scroll state for the heap pane
pub struct HeapScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the heap pane
pub struct HeapRenderData<'a> {
    pub heap: &'a Heap,
    pub error_slot: Option<u32>,
}

fn dump_words(words: &[u32]) -> String {
    let mut text = words
        .iter()
        .take(WORDS_PER_ROW)
        .map(|w| format!("{:08x}", w))
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > WORDS_PER_ROW {
        text.push_str(&format!(" … +{}", words.len() - WORDS_PER_ROW));
    }
    text
}

/// Render the heap pane
pub fn render_heap_pane(
    frame: &mut Frame,
    area: Rect,
    data: HeapRenderData,
    is_focused: bool,
    scroll_state: &mut HeapScrollState,
) {
    let border_style = THEME.pane_border(is_focused);

    let block = Block::default()
        .title(format!(
            " Heap ({} arrays, {} words) ",
            data.heap.live_count(),
            data.heap.total_words()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items = vec![ListItem::new(Line::from(vec![
        Span::styled(" #0 ", Style::default().fg(THEME.accent)),
        Span::styled(
            format!("program [{}]", data.heap.program().len()),
            Style::default().fg(THEME.muted),
        ),
    ]))];

    let slots = data.heap.live_slots();
    if slots.is_empty() {
        all_items.push(
            ListItem::new(" (no allocations)").style(Style::default().fg(THEME.muted)),
        );
    }

    for slot in slots {
        let words = data.heap.get(slot).unwrap_or(&[]);
        let is_error = data.error_slot == Some(slot);
        let id_style = if is_error {
            Style::default()
                .fg(THEME.fault)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(THEME.accent)
        };

        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(format!(" #{} ", slot), id_style),
            Span::styled(
                format!("[{}] ", words.len()),
                Style::default().fg(THEME.muted),
            ),
            Span::styled(dump_words(words), Style::default().fg(THEME.literal)),
        ])));
    }

    // Stay at the bottom when new arrays appear and we were already there
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = total_items.saturating_sub(visible_height);
    let was_at_bottom =
        scroll_state.offset >= scroll_state.prev_item_count.saturating_sub(visible_height);
    if total_items > scroll_state.prev_item_count && was_at_bottom {
        scroll_state.offset = max_scroll;
    }
    scroll_state.offset = scroll_state.offset.min(max_scroll);
    scroll_state.prev_item_count = total_items;

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
