//! Terminal implementation of the controller shell.
//!
//! Rendered views go to stdout; alerts, prompts and hints go to stderr so
//! tables can be piped.

use std::io::{self, BufRead, Write};

use crm_client::{Shell, Surface};

/// Shell reading answers from `input` and writing views to `out`.
pub struct TerminalShell<R, O, E> {
    input: R,
    out: O,
    err: E,
    assume_yes: bool,
    last_navigation: Option<Surface>,
}

/// Terminal shell bound to the process's standard streams.
pub type StdShell = TerminalShell<io::StdinLock<'static>, io::Stdout, io::Stderr>;

impl StdShell {
    /// Shell on stdin, stdout and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, O: Write, E: Write> TerminalShell<R, O, E> {
    #[must_use]
    pub const fn new(input: R, out: O, err: E) -> Self {
        Self {
            input,
            out,
            err,
            assume_yes: false,
            last_navigation: None,
        }
    }

    /// Answer every confirmation with yes, without prompting.
    #[must_use]
    pub const fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Surface of the most recent navigation.
    #[must_use]
    pub const fn last_navigation(&self) -> Option<Surface> {
        self.last_navigation
    }

    /// Print `prompt` and read one line without its line ending.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns error if the terminal cannot be read or written.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.err, "{prompt}")?;
        self.err.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for a field, keeping `current` when the answer is blank.
    ///
    /// # Errors
    ///
    /// Returns error if the terminal cannot be read or written.
    pub fn read_field(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        Ok(self.read_line(&prompt)?.map(|answer| {
            let answer = answer.trim();
            if answer.is_empty() {
                current.to_string()
            } else {
                answer.to_string()
            }
        }))
    }

    /// Write an informational line to stderr.
    pub fn note(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{message}") {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    /// Recover the underlying streams.
    pub fn into_parts(self) -> (R, O, E) {
        (self.input, self.out, self.err)
    }
}

impl<R: BufRead, O: Write, E: Write> Shell for TerminalShell<R, O, E> {
    fn navigate(&mut self, surface: Surface) {
        self.last_navigation = Some(surface);
        if surface == Surface::Login {
            self.note("Not signed in. Run `crm login` first.");
        } else {
            tracing::debug!(%surface, "Navigated");
        }
    }

    fn alert(&mut self, message: &str) {
        self.note(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.read_line(&format!("{message} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }

    fn present(&mut self, _surface: Surface, content: &str) {
        if let Err(e) = writeln!(self.out, "{content}") {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}
