//! Pip inventory, upgrades, and index lookups.
//!
//! Everything here runs through `<python> -m pip` against the
//! interpreters found by [`crate::discovery`], so each interpreter's own
//! pip is exercised rather than whatever `pip` happens to be on the
//! search path.

pub mod inventory;
pub mod manager;
pub mod pypi;

pub use inventory::{collect_packages, list_packages, parse_columns, uninstall, PackageRecord};
pub use manager::{collect_pip_records, extract_version, upgrade, PipRecord, PIP_NOT_INSTALLED};
pub use pypi::{PyPiClient, PYPI_BASE_URL};
