//! Installed-package inventory across discovered interpreters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::discovery::Interpreter;
use crate::exec::{self, ExecOutcome};
use crate::Result;

/// Time budget for `pip list`.
const LIST_TIMEOUT: Duration = Duration::from_secs(20);
/// Time budget for `pip uninstall`.
const UNINSTALL_TIMEOUT: Duration = Duration::from_secs(30);

/// One installed package, tagged with the interpreter that owns it.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// Selection ID, 1-based and unique across the whole listing.
    pub id: usize,
    /// Interpreter the package belongs to.
    pub interpreter_path: PathBuf,
    /// Rendered version of that interpreter.
    pub interpreter_version: String,
    /// Package name as pip reports it.
    pub name: String,
    /// Package version as pip reports it.
    pub version: String,
}

/// Parse `pip list --format=columns` output into (name, version) pairs.
///
/// The first two lines are the header and its underline. Rows that do not
/// split into at least two fields are dropped.
pub fn parse_columns(output: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = output.trim().lines().collect();
    if lines.len() <= 2 {
        return Vec::new();
    }
    lines[2..]
        .iter()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(name), Some(version)) => Some((name.to_string(), version.to_string())),
                _ => None,
            }
        })
        .collect()
}

/// List the packages installed for one interpreter.
///
/// Any failure (pip missing, stub executable, timeout) collapses to an
/// empty list; a broken interpreter must not abort the sweep.
pub fn list_packages(python: &Path) -> Vec<(String, String)> {
    match exec::run(python, &["-m", "pip", "list", "--format=columns"], Some(LIST_TIMEOUT)) {
        Ok(outcome) if outcome.success => parse_columns(&outcome.stdout),
        Ok(outcome) => {
            debug!(
                "pip list failed for {}: {}",
                python.display(),
                outcome.combined_output()
            );
            Vec::new()
        }
        Err(e) => {
            debug!("pip list failed for {}: {}", python.display(), e);
            Vec::new()
        }
    }
}

/// Collect the package inventory for every interpreter, assigning IDs
/// sequentially across the combined listing.
pub fn collect_packages(interpreters: &[Interpreter]) -> Vec<PackageRecord> {
    let mut records = Vec::new();
    let mut next_id = 1;
    for interpreter in interpreters {
        for (name, version) in list_packages(&interpreter.path) {
            records.push(PackageRecord {
                id: next_id,
                interpreter_path: interpreter.path.clone(),
                interpreter_version: interpreter.version.to_string(),
                name,
                version,
            });
            next_id += 1;
        }
    }
    debug!("collected {} package records", records.len());
    records
}

/// Uninstall one package through its owning interpreter.
pub fn uninstall(python: &Path, package: &str) -> Result<ExecOutcome> {
    exec::run(
        python,
        &["-m", "pip", "uninstall", package, "-y"],
        Some(UNINSTALL_TIMEOUT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::VersionInfo;
    use tempfile::TempDir;

    const COLUMNS_OUTPUT: &str =
        "Package    Version\n---------- -------\nrequests   2.31.0\npip        23.3.1\n";

    #[cfg(unix)]
    fn fake_python(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn interpreter(path: PathBuf) -> Interpreter {
        Interpreter {
            name: "python".to_string(),
            path,
            version: VersionInfo::Known("Python 3.11.4".to_string()),
            store_stub: false,
        }
    }

    #[test]
    fn parses_columns_output() {
        let packages = parse_columns(COLUMNS_OUTPUT);

        assert_eq!(
            packages,
            vec![
                ("requests".to_string(), "2.31.0".to_string()),
                ("pip".to_string(), "23.3.1".to_string()),
            ]
        );
    }

    #[test]
    fn header_only_output_is_empty() {
        assert!(parse_columns("Package    Version\n---------- -------\n").is_empty());
        assert!(parse_columns("").is_empty());
    }

    #[test]
    fn rows_without_a_version_field_are_dropped() {
        let output = "Package    Version\n---------- -------\nrequests   2.31.0\nbroken\n";

        assert_eq!(
            parse_columns(output),
            vec![("requests".to_string(), "2.31.0".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn lists_packages_from_a_working_pip() {
        let dir = TempDir::new().unwrap();
        let python = fake_python(
            dir.path(),
            "python",
            "printf 'Package    Version\\n---------- -------\\nrequests   2.31.0\\n'",
        );

        let packages = list_packages(&python);

        assert_eq!(packages, vec![("requests".to_string(), "2.31.0".to_string())]);
    }

    #[cfg(unix)]
    #[test]
    fn broken_pip_yields_an_empty_inventory() {
        let dir = TempDir::new().unwrap();
        let python = fake_python(dir.path(), "python", "echo \"No module named pip\" >&2\nexit 1");

        assert!(list_packages(&python).is_empty());
        assert!(list_packages(Path::new("/nonexistent/python-for-tests")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn ids_are_sequential_across_interpreters() {
        let dir = TempDir::new().unwrap();
        let first = fake_python(
            dir.path(),
            "python310",
            "printf 'Package Version\\n------- -------\\nrequests 2.31.0\\nflask 3.0.0\\n'",
        );
        let second = fake_python(
            dir.path(),
            "python311",
            "printf 'Package Version\\n------- -------\\nnumpy 1.26.4\\n'",
        );

        let records = collect_packages(&[interpreter(first), interpreter(second.clone())]);

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[2].name, "numpy");
        assert_eq!(records[2].interpreter_path, second);
    }

    #[cfg(unix)]
    #[test]
    fn uninstall_reports_the_outcome() {
        let dir = TempDir::new().unwrap();
        let good = fake_python(dir.path(), "good", "echo \"Successfully uninstalled requests\"");
        let bad = fake_python(dir.path(), "bad", "echo \"not installed\" >&2\nexit 1");

        let ok = uninstall(&good, "requests").unwrap();
        assert!(ok.success);
        assert!(ok.stdout.contains("Successfully uninstalled"));

        let failed = uninstall(&bad, "requests").unwrap();
        assert!(!failed.success);
        assert!(failed.stderr.contains("not installed"));
    }
}
