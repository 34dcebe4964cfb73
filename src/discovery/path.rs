//! Filesystem-level interpreter lookup.
//!
//! Three primitives back the discovery pass: resolve a name against the
//! search path, scan a well-known directory for `python*` executables, and
//! classify Microsoft Store placeholder launchers by path shape.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Parse the `PATH` environment variable into its entries.
pub fn parse_system_path() -> Vec<PathBuf> {
    match env::var_os("PATH") {
        Some(path) => env::split_paths(&path).collect(),
        None => Vec::new(),
    }
}

/// Resolve `name` against the given search-path entries.
///
/// Deliberately simpler than a full `which`: the first entry holding an
/// executable regular file with the exact name wins, which is all the
/// interpreter lookup needs. No PATHEXT handling, no current-dir fallback.
pub fn resolve_on_path(name: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for entry in path_entries {
        let candidate = entry.join(name);
        if candidate.is_file() && is_executable(&candidate) {
            debug!("resolved {} to {}", name, candidate.display());
            return Some(candidate);
        }
    }
    None
}

/// List executable regular files in `dir` whose filename starts with
/// `python`, in sorted filename order.
///
/// A missing or unreadable directory yields an empty list; the caller
/// moves on to the next location.
pub fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("python"))
                && path.is_file()
                && is_executable(path)
        })
        .collect();
    found.sort();
    found
}

/// Directories checked for interpreters beyond the search path.
///
/// Home-relative entries are skipped when no home directory can be
/// determined; nonexistent directories fall out naturally during the scan.
pub fn well_known_dirs() -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = [
        "/usr/bin",
        "/usr/local/bin",
        "/opt/python",
        "/opt/local/bin",
        "/bin",
        "/usr/sbin",
        "/sbin",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".pyenv/versions"));
        locations.push(home.join(".local/bin"));
    }

    for version in ["27", "36", "37", "38", "39", "310", "311"] {
        locations.push(PathBuf::from(format!("C:/Python{}", version)));
    }

    locations
}

/// Check whether `path` may be executed by the current user.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On non-Unix platforms the execute bit does not exist; callers pair this
/// with an `is_file` check.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Classify Microsoft Store placeholder launchers.
///
/// The Store drops `python.exe`/`python3.exe` stubs under a `WindowsApps`
/// directory; they open the Store instead of running an interpreter, so
/// every surface that shows them carries a label.
pub fn is_store_stub(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    if !path_str.contains("WindowsApps") {
        return false;
    }
    let lower = path_str.to_lowercase();
    lower.ends_with("python.exe") || lower.ends_with("python3.exe")
}
