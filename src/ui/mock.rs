//! Mock console implementation for testing.
//!
//! `MockConsole` implements the `Console` trait and captures all
//! interactions for later assertion. Input lines are scripted up front
//! and handed out one per `read_line` call.
//!
//! # Example
//!
//! ```
//! use pytower::ui::{Console, MockConsole};
//!
//! let mut console = MockConsole::with_input(&["5"]);
//!
//! // Use console in code under test...
//! console.message("Welcome to PyTower!");
//! let choice = console.read_line("Enter your choice (1-5): ").unwrap();
//!
//! assert_eq!(choice.as_deref(), Some("5"));
//! assert!(console.has_message("Welcome"));
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::Result;

use super::{Console, SpinnerHandle};

/// Mock console implementation for testing.
///
/// Captures all output and serves scripted input. Once the input script
/// runs out, `read_line` reports end-of-input.
#[derive(Debug, Default)]
pub struct MockConsole {
    input: VecDeque<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    prompts: Vec<String>,
    spinners: Vec<String>,
    pauses: Vec<Duration>,
    clears: usize,
}

impl MockConsole {
    /// Create a mock with no scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that will serve the given input lines in order.
    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Get all captured plain messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all prompts that were shown, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all requested pauses, in order.
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    /// Number of screen clears requested.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Check if a plain message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a prompt containing `msg` was shown.
    pub fn has_prompt(&self, msg: &str) -> bool {
        self.prompts.iter().any(|m| m.contains(msg))
    }
}

impl Console for MockConsole {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn header(&mut self, msg: &str) {
        self.headers.push(msg.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Mock spinner that records nothing and displays nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_and_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_by_kind() {
        let mut console = MockConsole::new();
        console.message("plain");
        console.success("good");
        console.warning("careful");
        console.error("bad");
        console.header("PyTower");

        assert_eq!(console.messages(), &["plain".to_string()]);
        assert_eq!(console.successes(), &["good".to_string()]);
        assert_eq!(console.warnings(), &["careful".to_string()]);
        assert_eq!(console.errors(), &["bad".to_string()]);
        assert_eq!(console.headers(), &["PyTower".to_string()]);
    }

    #[test]
    fn serves_scripted_input_in_order() {
        let mut console = MockConsole::with_input(&["1", "2"]);

        assert_eq!(console.read_line("first: ").unwrap().as_deref(), Some("1"));
        assert_eq!(console.read_line("second: ").unwrap().as_deref(), Some("2"));
        assert_eq!(console.read_line("third: ").unwrap(), None);
        assert_eq!(console.prompts().len(), 3);
    }

    #[test]
    fn has_helpers_match_substrings() {
        let mut console = MockConsole::new();
        console.warning("No Python installations found.");

        assert!(console.has_warning("No Python installations"));
        assert!(!console.has_warning("pip"));
    }

    #[test]
    fn records_pauses_and_clears() {
        let mut console = MockConsole::new();
        console.pause(Duration::from_secs(2));
        console.clear_screen();
        console.clear_screen();

        assert_eq!(console.pauses(), &[Duration::from_secs(2)]);
        assert_eq!(console.clears(), 2);
    }

    #[test]
    fn spinner_messages_are_recorded() {
        let mut console = MockConsole::new();
        let mut spinner = console.start_spinner("Probing Python interpreters...");
        spinner.finish_and_clear();

        assert_eq!(console.spinners().len(), 1);
        assert!(console.spinners()[0].contains("Probing"));
    }
}
