//! Scripted console: queued input lines, captured output.

use airline_core::environment::Console;
use airline_core::error::ConsoleError;
use std::collections::VecDeque;

/// Console double fed from a list of input lines.
///
/// Once the lines run out, [`Console::read_line`] reports end of input, which
/// every prompt loop treats as "abort".
///
/// # Example
///
/// ```
/// use airline_core::environment::Console;
/// use airline_testing::ScriptedConsole;
///
/// let mut console = ScriptedConsole::new(["F100"]);
/// assert_eq!(console.read_line("Flight: ").unwrap().as_deref(), Some("F100"));
/// assert_eq!(console.read_line("Flight: ").unwrap(), None);
/// console.write_line("FLIGHT F100").unwrap();
/// assert!(console.printed("F100"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Console that will answer prompts with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Lines printed so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// `true` if any printed line contains `text`.
    #[must_use]
    pub fn printed(&self, text: &str) -> bool {
        self.output.iter().any(|line| line.contains(text))
    }

    /// Input lines not consumed yet.
    #[must_use]
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.output.push(line.to_string());
        Ok(())
    }
}
