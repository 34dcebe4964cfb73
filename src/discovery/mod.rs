//! Locating Python interpreters on the local system.
//!
//! Discovery runs in two phases:
//! 1. Resolve the canonical alias names ([`PYTHON_ALIASES`]) against the
//!    search path, first hit per alias.
//! 2. Scan the well-known installation directories for `python*` binaries.
//!
//! Both phases share one set of seen paths, so an interpreter reachable
//! through several aliases or directories is recorded exactly once.

pub mod interpreter;
pub mod path;

pub use interpreter::{
    discover, probe_version, DiscoveryPass, Interpreter, ProbeFailure, SearchPaths, VersionInfo,
    PYTHON_ALIASES,
};
pub use path::{is_store_stub, parse_system_path, resolve_on_path, scan_directory, well_known_dirs};
