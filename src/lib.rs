//! PyTower - Interactive Python installation administration.
//!
//! PyTower is a menu-driven terminal tool that discovers the Python
//! interpreters installed on a machine, reports their versions and
//! installed packages, and can uninstall packages or upgrade pip for any
//! of them.
//!
//! # Modules
//!
//! - [`discovery`] - Locating interpreters on PATH and in well-known directories
//! - [`error`] - Error types and result aliases
//! - [`exec`] - Child process execution with optional timeouts
//! - [`menu`] - The interactive menu loop
//! - [`pip`] - Package inventory, pip upgrades, and PyPI lookups
//! - [`ui`] - Terminal output, themes, spinners, and tables
//!
//! # Example
//!
//! ```
//! use pytower::ui::fit;
//!
//! // Fixed-width cells keep the tables aligned however long a path gets.
//! assert_eq!(fit("3.11.4", 10), "3.11.4    ");
//! assert_eq!(fit("/very/long/interpreter/path", 10), "/very/l...");
//! ```

pub mod discovery;
pub mod error;
pub mod exec;
pub mod menu;
pub mod pip;
pub mod ui;

pub use error::{PytowerError, Result};
