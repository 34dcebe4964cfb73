//! Pip version probing and upgrades.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::discovery::Interpreter;
use crate::exec::{self, ExecOutcome};
use crate::Result;

/// Time budget for `pip --version`.
const VERSION_TIMEOUT: Duration = Duration::from_secs(20);
/// Time budget for `pip install --upgrade pip`.
const UPGRADE_TIMEOUT: Duration = Duration::from_secs(60);

/// Rendered in place of a version when pip is missing or unreadable.
pub const PIP_NOT_INSTALLED: &str = "pip not installed";

/// Matches the leading version in `pip X.Y[.Z] from ...` banners.
static PIP_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pip (\d+\.\d+(?:\.\d+)?)").expect("PIP_VERSION_RE must compile"));

/// The pip installation belonging to one interpreter.
#[derive(Debug, Clone)]
pub struct PipRecord {
    /// Selection ID, 1-based, in discovery order.
    pub id: usize,
    /// Interpreter this pip belongs to.
    pub interpreter_path: PathBuf,
    /// Rendered version of that interpreter.
    pub interpreter_version: String,
    /// Full probe output, or [`PIP_NOT_INSTALLED`].
    pub raw_version: String,
    /// The bare `X.Y[.Z]` version when one could be extracted.
    pub version: Option<String>,
    /// Whether the owning interpreter is a Microsoft Store stub.
    pub store_stub: bool,
}

/// Extract the bare version number from a `pip --version` banner.
pub fn extract_version(output: &str) -> Option<String> {
    PIP_VERSION_RE
        .captures(output)
        .map(|captures| captures[1].to_string())
}

/// Probe `<python> -m pip --version`.
///
/// Returns the raw banner plus the extracted version. Every failure mode,
/// including a banner the regex cannot read, collapses to the
/// [`PIP_NOT_INSTALLED`] sentinel with no extracted version.
pub fn probe_version(python: &Path) -> (String, Option<String>) {
    match exec::run(python, &["-m", "pip", "--version"], Some(VERSION_TIMEOUT)) {
        Ok(outcome) if outcome.success => {
            let raw = outcome.combined_output();
            match extract_version(&raw) {
                Some(version) => (raw, Some(version)),
                None => {
                    debug!("unparsable pip banner from {}: {}", python.display(), raw);
                    (PIP_NOT_INSTALLED.to_string(), None)
                }
            }
        }
        Ok(outcome) => {
            debug!(
                "pip --version failed for {}: {}",
                python.display(),
                outcome.combined_output()
            );
            (PIP_NOT_INSTALLED.to_string(), None)
        }
        Err(e) => {
            debug!("pip --version failed for {}: {}", python.display(), e);
            (PIP_NOT_INSTALLED.to_string(), None)
        }
    }
}

/// Probe pip for every interpreter, stubs included, in discovery order.
pub fn collect_pip_records(interpreters: &[Interpreter]) -> Vec<PipRecord> {
    interpreters
        .iter()
        .enumerate()
        .map(|(index, interpreter)| {
            let (raw_version, version) = probe_version(&interpreter.path);
            PipRecord {
                id: index + 1,
                interpreter_path: interpreter.path.clone(),
                interpreter_version: interpreter.version.to_string(),
                raw_version,
                version,
                store_stub: interpreter.store_stub,
            }
        })
        .collect()
}

/// Upgrade pip itself through one interpreter.
pub fn upgrade(python: &Path) -> Result<ExecOutcome> {
    exec::run(
        python,
        &["-m", "pip", "install", "--upgrade", "pip"],
        Some(UPGRADE_TIMEOUT),
    )
}
