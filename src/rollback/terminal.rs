// ABOUTME: Line-oriented adapter that renders selector prompts and reads answers.
// ABOUTME: Generic over reader and writer so tests can script a whole conversation.

use super::selector::{Prompt, PromptKind};
use std::io::{BufRead, Write};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input ended while a prompt was waiting for an answer.
    #[error("input closed while waiting for an answer")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks the operator one question at a time.
pub trait Prompter {
    /// Show `prompt` and return the answer line without its line ending.
    fn ask(&mut self, prompt: &Prompt) -> Result<String, PromptError>;

    /// Print an informational line in the conversation.
    fn say(&mut self, line: &str) -> Result<(), PromptError>;
}

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> Result<String, PromptError> {
        if let Some(notice) = &prompt.notice {
            writeln!(self.output, "{notice}")?;
        }
        if let Some(heading) = &prompt.heading {
            writeln!(self.output, "\n{heading}")?;
        }
        for (i, option) in prompt.options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option.label)?;
            if let Some(detail) = &option.detail {
                writeln!(self.output, "      {detail}")?;
            }
        }
        if prompt.kind == PromptKind::Confirm {
            writeln!(self.output)?;
        }
        write!(self.output, "{}", prompt.question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
