//! Interactive user interface components.
//!
//! This module provides:
//! - [`Console`] trait for UI abstraction
//! - [`TerminalConsole`] for interactive terminal usage
//! - [`MockConsole`] for scripted tests
//! - Spinners, themes, and fixed-width tables
//!
//! # Example
//!
//! ```
//! use pytower::ui::{Console, MockConsole};
//!
//! let mut console = MockConsole::new();
//! console.message("Welcome to PyTower!");
//! console.success("Setup complete!");
//! assert!(console.has_message("Welcome to PyTower!"));
//! ```

pub mod mock;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockConsole, MockSpinner};
pub use spinner::ProgressSpinner;
pub use table::{fit, Table};
pub use terminal::TerminalConsole;
pub use theme::{should_use_colors, PytowerTheme};

use std::time::Duration;

use crate::error::Result;

/// Trait for console interactions.
///
/// This trait allows mocking the console in tests.
pub trait Console {
    /// Display a plain line.
    fn message(&mut self, msg: &str);

    /// Display a success line.
    fn success(&mut self, msg: &str);

    /// Display a warning line.
    fn warning(&mut self, msg: &str);

    /// Display an error line.
    fn error(&mut self, msg: &str);

    /// Display a header line.
    fn header(&mut self, msg: &str);

    /// Show a prompt and read one line of input.
    ///
    /// `Ok(None)` means the input stream ended, either at end of input or
    /// because an interrupt arrived while waiting.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Clear the screen, when the output is a real terminal.
    fn clear_screen(&mut self);

    /// Block for the given duration.
    fn pause(&mut self, duration: Duration);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Stop the spinner and erase it from the terminal.
    fn finish_and_clear(&mut self);
}
