//! Byte-stream console devices
//!
//! The machine talks to the outside world one byte at a time through a
//! [`Console`]. [`StdConsole`] wires it to the process's stdin/stdout;
//! [`MockTerminal`] scripts the input and captures the output for tests and
//! for the trace viewer.

use std::collections::VecDeque;
use std::io::{self, BufWriter, Read, Stdin, Stdout, Write};

/// Input and output boundary of the machine
pub trait Console {
    /// Read one byte, or `None` once the input is exhausted
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Emit one byte
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Push any buffered output to the device
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console backed by the process's standard streams
pub struct StdConsole {
    input: Stdin,
    output: BufWriter<Stdout>,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole {
            input: io::stdin(),
            output: BufWriter::new(io::stdout()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        // Prompts must be visible before we block on the reader
        self.output.flush()?;

        let mut byte = [0u8; 1];
        loop {
            match self.input.lock().read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Mock terminal for scripted input and captured output
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal whose input stream yields `input` and then ends
    pub fn with_input(input: impl Into<Vec<u8>>) -> Self {
        let input: Vec<u8> = input.into();
        MockTerminal {
            input: input.into(),
            output: Vec::new(),
        }
    }

    /// Everything written so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded lossily as text
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Output split into lines, without a trailing empty line
    pub fn get_output(&self) -> Vec<String> {
        let text = self.output_text();
        let mut lines: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Bytes of scripted input not yet consumed
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for MockTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_terminal_input_then_eof() {
        let mut terminal = MockTerminal::with_input("ab");
        assert_eq!(terminal.read_byte().unwrap(), Some(b'a'));
        assert_eq!(terminal.remaining_input(), 1);
        assert_eq!(terminal.read_byte().unwrap(), Some(b'b'));
        assert_eq!(terminal.read_byte().unwrap(), None);
        assert_eq!(terminal.read_byte().unwrap(), None);
    }

    #[test]
    fn test_mock_terminal_lines() {
        let mut terminal = MockTerminal::new();
        for &byte in b"hello\nworld\n" {
            terminal.write_byte(byte).unwrap();
        }
        assert_eq!(terminal.get_output(), vec!["hello", "world"]);
        assert_eq!(terminal.output(), b"hello\nworld\n");
    }
}
