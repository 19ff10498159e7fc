use std::io::{self, BufRead, Write};

use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};

/// Line-oriented prompt/response seam between the store and its user.
pub trait Console {
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Shows `prompt` and reads one answer, trimmed. `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Plain buffered console for piped stdin and scripted sessions.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Interactive console with dialoguer prompts.
pub struct TerminalConsole {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn say(&mut self, message: &str) -> io::Result<()> {
        self.term.write_line(message)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term);

        match answer {
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}
