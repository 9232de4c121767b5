//! Operator interaction capability.
//!
//! The single yes/no gate before execution (and the acknowledgment pause on
//! fatal diagnostics) go through [`Prompter`] so both paths are testable.

use anyhow::Result;
use std::io::{self, IsTerminal, Write};

pub trait Prompter {
    /// Ask a yes/no question. Only "y"/"yes" (case-insensitive) is
    /// affirmative; everything else declines.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Pause until the operator acknowledges, so a fatal diagnostic is not
    /// lost when the terminal window closes with the process.
    fn acknowledge(&self, message: &str);
}

/// Production impl reading answers from stdin.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        eprint!("{} [y/N] ", message);
        io::stderr().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn acknowledge(&self, message: &str) {
        // Pointless when stdin is a pipe; skip so unattended runs don't hang.
        if !io::stdin().is_terminal() {
            return;
        }
        eprint!("{}", message);
        let _ = io::stderr().flush();
        let mut sink = String::new();
        let _ = io::stdin().read_line(&mut sink);
    }
}
