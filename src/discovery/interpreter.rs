//! Interpreter discovery and version probing.
//!
//! A discovery pass sweeps the search-path aliases first, then the
//! well-known directories, deduplicating by alias name and by resolved
//! path so no binary is probed twice. Every resolved path contributes a
//! record, whether its version probe worked or not.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::path::{
    is_store_stub, parse_system_path, resolve_on_path, scan_directory, well_known_dirs,
};
use crate::error::PytowerError;
use crate::exec;

/// Canonical interpreter names probed on the search path, in order.
pub const PYTHON_ALIASES: &[&str] = &[
    "python",
    "python3",
    "python2",
    "py",
    "python3.11",
    "python3.10",
    "python3.9",
    "python3.8",
    "python3.7",
    "python3.6",
    "python2.7",
];

/// Why a version probe produced no usable version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The executable could not be started.
    Launch(String),
    /// The probe overran its time budget.
    Timeout(u64),
    /// The executable ran but exited non-zero.
    Exit { code: Option<i32>, detail: String },
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Launch(reason) => write!(f, "{}", reason),
            ProbeFailure::Timeout(secs) => write!(f, "timed out after {}s", secs),
            ProbeFailure::Exit {
                code: Some(code),
                detail,
            } => {
                if detail.is_empty() {
                    write!(f, "exit status {}", code)
                } else {
                    write!(f, "exit status {}: {}", code, detail)
                }
            }
            ProbeFailure::Exit { code: None, detail } => {
                if detail.is_empty() {
                    write!(f, "terminated by signal")
                } else {
                    write!(f, "terminated by signal: {}", detail)
                }
            }
        }
    }
}

/// Raw interpreter version output, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionInfo {
    Known(String),
    Unknown(ProbeFailure),
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionInfo::Known(version) => write!(f, "{}", version),
            VersionInfo::Unknown(reason) => write!(f, "Unknown version ({})", reason),
        }
    }
}

/// A Python interpreter located during a discovery pass.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// The alias that resolved, or the filename for directory hits.
    pub name: String,
    /// Absolute path of the executable.
    pub path: PathBuf,
    /// Raw `--version` output or the probe failure.
    pub version: VersionInfo,
    /// Whether the path matches the Microsoft Store stub pattern.
    pub store_stub: bool,
}

/// Where a discovery pass looks.
#[derive(Debug, Clone)]
pub struct SearchPaths {
    /// Entries of the search path, in order.
    pub path_entries: Vec<PathBuf>,
    /// Well-known installation directories, in order.
    pub directories: Vec<PathBuf>,
}

impl SearchPaths {
    /// Snapshot the real environment.
    pub fn from_environment() -> Self {
        Self {
            path_entries: parse_system_path(),
            directories: well_known_dirs(),
        }
    }
}

/// Outcome of one discovery pass: the records in discovery order plus the
/// dedup sets that produced them.
#[derive(Debug, Default)]
pub struct DiscoveryPass {
    pub records: Vec<Interpreter>,
    pub seen_names: HashSet<String>,
    pub seen_paths: HashSet<PathBuf>,
}

/// Run `<path> --version` and record the combined output or the failure.
///
/// The probe carries no timeout; only the pip operations are time-bounded.
pub fn probe_version(path: &Path) -> VersionInfo {
    match exec::run(path, &["--version"], None) {
        Ok(outcome) if outcome.success => VersionInfo::Known(outcome.combined_output()),
        Ok(outcome) => VersionInfo::Unknown(ProbeFailure::Exit {
            code: outcome.exit_code,
            detail: outcome.combined_output(),
        }),
        Err(PytowerError::Timeout { secs, .. }) => {
            VersionInfo::Unknown(ProbeFailure::Timeout(secs))
        }
        Err(PytowerError::Launch { source, .. }) => {
            VersionInfo::Unknown(ProbeFailure::Launch(source.to_string()))
        }
        Err(e) => VersionInfo::Unknown(ProbeFailure::Launch(e.to_string())),
    }
}

/// One complete sweep over the alias list and the well-known directories.
///
/// The seen-sets live inside the returned pass, so two calls never share
/// dedup state. Alias hits come first, then directory hits, both in their
/// declared order.
pub fn discover(sources: &SearchPaths) -> DiscoveryPass {
    let mut pass = DiscoveryPass::default();

    for alias in PYTHON_ALIASES {
        if !pass.seen_names.insert((*alias).to_string()) {
            continue;
        }
        let Some(path) = resolve_on_path(alias, &sources.path_entries) else {
            continue;
        };
        if !pass.seen_paths.insert(path.clone()) {
            debug!("{} already probed at {}", alias, path.display());
            continue;
        }
        pass.records.push(probe_record((*alias).to_string(), path));
    }

    for dir in &sources.directories {
        for path in scan_directory(dir) {
            if !pass.seen_paths.insert(path.clone()) {
                debug!("skipping already probed {}", path.display());
                continue;
            }
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            pass.records.push(probe_record(name, path));
        }
    }

    debug!("discovery pass found {} interpreters", pass.records.len());
    pass
}

fn probe_record(name: String, path: PathBuf) -> Interpreter {
    let version = probe_version(&path);
    let store_stub = is_store_stub(&path);
    Interpreter {
        name,
        path,
        version,
        store_stub,
    }
}
