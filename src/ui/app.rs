//! Main TUI application state and logic

use crate::machine::engine::MachineState;
use crate::machine::errors::MachineError;
use crate::snapshot::{Trace, TraceOutcome};
use crate::ui::panes::{
    self, HeapRenderData, HeapScrollState, ProgramScrollState, StatusRenderData,
    TerminalScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Registers,
    Heap,
    Terminal,
}

impl FocusedPane {
    /// Tab order: down the left column, then down the right one
    const ORDER: [FocusedPane; 4] = [
        FocusedPane::Program,
        FocusedPane::Terminal,
        FocusedPane::Registers,
        FocusedPane::Heap,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// The main application state
pub struct App {
    /// The recorded run being navigated
    pub trace: Trace,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub program_scroll: ProgramScrollState,
    pub heap_scroll: HeapScrollState,
    pub terminal_scroll: TerminalScrollState,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(trace: Trace) -> Self {
        let status_message = match trace.outcome() {
            TraceOutcome::Halted => "Ready! Program halted normally".to_string(),
            TraceOutcome::Faulted(e) => format!("Ready! Program faulted: {}", e),
            TraceOutcome::StepLimitReached => "Ready! Step limit reached".to_string(),
            TraceOutcome::SnapshotLimitReached(e) => format!("Ready! {}", e),
        };

        App {
            trace,
            focused_pane: FocusedPane::Program,
            program_scroll: ProgramScrollState {
                offset: 0,
                target_line_row: None, // Centered on first render
            },
            heap_scroll: HeapScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            terminal_scroll: TerminalScrollState { offset: 0 },
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(250) {
                if self.trace.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.terminal_scroll.offset = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Array named by the fault at the current position, if any
    fn error_slot(&self) -> Option<u32> {
        match self.trace.error_here() {
            Some(MachineError::InactiveArray { slot, .. })
            | Some(MachineError::IndexOutOfBounds { slot, .. }) => Some(*slot),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Program (top) | Terminal (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Registers (top) | Heap (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(11), Constraint::Min(0)])
            .split(columns[1]);

        let position = self.trace.history_position();
        let is_error = self.trace.error_here().is_some();
        let error_slot = self.error_slot();

        let Some(snapshot) = self.trace.current() else {
            panes::render_status_bar(
                frame,
                main_chunks[1],
                StatusRenderData {
                    message: "No snapshots recorded",
                    current_step: 0,
                    total_steps: 0,
                    is_error: true,
                    is_halted: false,
                    is_playing: false,
                },
            );
            return;
        };
        let previous = position
            .checked_sub(1)
            .and_then(|p| self.trace.snapshot_at(p))
            .map(|s| &s.registers);

        panes::render_program_pane(
            frame,
            left_rows[0],
            snapshot.heap.program(),
            snapshot.finger,
            is_error,
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        panes::render_terminal_pane(
            frame,
            left_rows[1],
            &snapshot.terminal,
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        panes::render_registers_pane(
            frame,
            right_rows[0],
            &snapshot.registers,
            previous,
            snapshot.finger,
            snapshot.cycle,
            self.focused_pane == FocusedPane::Registers,
        );

        panes::render_heap_pane(
            frame,
            right_rows[1],
            HeapRenderData {
                heap: &snapshot.heap,
                error_slot,
            },
            self.focused_pane == FocusedPane::Heap,
            &mut self.heap_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: position,
                total_steps: self.trace.total_snapshots(),
                is_error,
                is_halted: snapshot.state == MachineState::Halted,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.trace.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.terminal_scroll.offset = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => self.scroll_focused(-1),
            KeyCode::Down => self.scroll_focused(1),
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.trace.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.terminal_scroll.offset = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.rewind_to_start();
            }
            _ => {}
        }
    }

    /// Scroll the focused pane by one row; negative moves towards the top
    fn scroll_focused(&mut self, delta: isize) {
        match self.focused_pane {
            // The program pane follows the finger, so move the row it is pinned to
            FocusedPane::Program => {
                if let Some(row) = self.program_scroll.target_line_row {
                    self.program_scroll.target_line_row = Some(row.saturating_add_signed(-delta));
                }
            }
            FocusedPane::Registers => {}
            FocusedPane::Heap => {
                self.heap_scroll.offset = self.heap_scroll.offset.saturating_add_signed(delta);
            }
            FocusedPane::Terminal => {
                self.terminal_scroll.offset =
                    self.terminal_scroll.offset.saturating_add_signed(delta);
            }
        }
    }

    fn step_forward(&mut self) {
        match self.trace.step_forward() {
            Ok(()) => {
                self.status_message = match self.trace.error_here() {
                    Some(e) => format!("Fault: {}", e),
                    None => "Stepped forward".to_string(),
                };
                self.terminal_scroll.offset = usize::MAX;
            }
            Err(MachineError::Generic { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    fn rewind_to_start(&mut self) {
        match self.trace.rewind_to_start() {
            Ok(()) => {
                self.status_message = "Jumped to start".to_string();
                self.terminal_scroll.offset = usize::MAX;
            }
            Err(e) => {
                self.status_message = format!("Cannot jump to start: {}", e);
            }
        }
    }

    fn step_backward(&mut self) {
        match self.trace.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.terminal_scroll.offset = usize::MAX;
            }
            Err(MachineError::Generic { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::TraceLimits;

    fn app_for(program: &[u32], max_memory: usize) -> App {
        let limits = TraceLimits {
            max_memory,
            ..TraceLimits::default()
        };
        App::new(Trace::record(program.to_vec(), Vec::new(), limits))
    }

    #[test]
    fn test_backspace_rewinds_to_start() {
        // ortho r0, 1; halt
        let mut app = app_for(&[0xD000_0001, 0x7000_0000], usize::MAX);
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.trace.history_position(), 2);

        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.trace.history_position(), 0);
        assert_eq!(app.status_message, "Jumped to start");
    }

    #[test]
    fn test_backspace_reports_empty_history() {
        let mut app = app_for(&[0x7000_0000], 1);
        assert_eq!(app.trace.total_snapshots(), 0);

        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(
            app.status_message,
            "Cannot jump to start: No snapshots available"
        );
    }

    #[test]
    fn test_focus_follows_tab_order() {
        assert_eq!(FocusedPane::Program.next(), FocusedPane::Terminal);
        assert_eq!(FocusedPane::Program.prev(), FocusedPane::Heap);
    }

    #[test]
    fn test_focus_cycle_round_trips() {
        let start = FocusedPane::Program;
        let mut pane = start;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, start);
        assert_eq!(FocusedPane::Heap.next().prev(), FocusedPane::Heap);
    }
}
