//! Console abstraction injected into every workflow.
//!
//! Workflows never touch stdin/stdout directly: they ask a [`Console`] for lines and
//! hand it lines to print. Production uses [`TerminalConsole`]; tests use the
//! scripted console from `airline-testing`.

use crate::error::ConsoleError;
use std::io::{BufRead, Write};

/// Line-oriented terminal.
pub trait Console {
    /// Print `prompt` without a newline and read one line of input.
    ///
    /// The line terminator is stripped. Returns `Ok(None)` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the terminal cannot be read or written.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    /// Print one line.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the terminal cannot be written.
    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError>;
}

/// Console over any reader/writer pair; stdin/stdout by default.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl TerminalConsole<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    /// Console over the given reader and writer.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
