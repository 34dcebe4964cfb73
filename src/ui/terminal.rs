//! Interactive terminal UI.

use console::Term;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::error::Result;

use super::{should_use_colors, Console, ProgressSpinner, PytowerTheme, SpinnerHandle};

/// Console backed by the real terminal.
pub struct TerminalConsole {
    term: Term,
    theme: PytowerTheme,
}

impl TerminalConsole {
    /// Create a console writing to stdout.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            PytowerTheme::new()
        } else {
            PytowerTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn header(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_header(msg)).ok();
    }

    /// Read one line from stdin, reporting end-of-input as `None`.
    ///
    /// The buffered read is driven by hand because the std line readers
    /// retry interrupted reads internally. The interrupt handler installed
    /// at startup leaves the read returning `Interrupted`, and this loop
    /// turns that into a clean `None` so the caller can exit.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.term, "{}", prompt)?;
        self.term.flush()?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut line = String::new();

        loop {
            let (done, used) = {
                let buffer = match input.fill_buf() {
                    Ok(buffer) => buffer,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                        writeln!(self.term).ok();
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                };
                if buffer.is_empty() {
                    writeln!(self.term).ok();
                    // A partial final line still counts as input.
                    return if line.is_empty() { Ok(None) } else { Ok(Some(line)) };
                }
                match buffer.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        line.push_str(&String::from_utf8_lossy(&buffer[..i]));
                        (true, i + 1)
                    }
                    None => {
                        line.push_str(&String::from_utf8_lossy(buffer));
                        (false, buffer.len())
                    }
                }
            };
            input.consume(used);
            if done {
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
        }
    }

    fn clear_screen(&mut self) {
        if self.term.is_term() {
            self.term.clear_screen().ok();
        }
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_console_creation() {
        let console = TerminalConsole::new();
        drop(console);
    }

    #[test]
    fn messages_do_not_panic_without_a_tty() {
        let mut console = TerminalConsole::new();
        console.message("plain");
        console.success("good");
        console.warning("careful");
        console.error("bad");
        console.header("PyTower");
        console.clear_screen();
    }

    #[test]
    fn spinner_is_hidden_without_a_tty() {
        let mut console = TerminalConsole::new();
        let mut spinner = console.start_spinner("working");
        spinner.set_message("still working");
        spinner.finish_and_clear();
    }
}
