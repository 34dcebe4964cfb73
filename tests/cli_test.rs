//! Integration tests for the menu-driven binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
#[cfg(unix)]
use tempfile::TempDir;

#[test]
fn cli_quit_immediately() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.write_stdin("5\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Welcome to PyTower!"))
        .stdout(predicate::str::contains("Thank you for using PyTower!"));
    Ok(())
}

#[test]
fn cli_menu_lists_all_five_options() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.write_stdin("5\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Available Options:"))
        .stdout(predicate::str::contains("1. Check python installations"))
        .stdout(predicate::str::contains(
            "2. Check active installation of python",
        ))
        .stdout(predicate::str::contains("3. Manage Libraries"))
        .stdout(predicate::str::contains("4. Manage Pip"))
        .stdout(predicate::str::contains("5. Exit"));
    Ok(())
}

#[test]
fn cli_invalid_choice_reprompts() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.write_stdin("9\n5\n");
    cmd.assert().success().stdout(predicate::str::contains(
        "Invalid choice. Please enter 1, 2, 3, 4, or 5.",
    ));
    Ok(())
}

#[test]
fn cli_end_of_input_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.write_stdin("");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Thank you for using PyTower!"));
    Ok(())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Python installation"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--no-color"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_reports_missing_default_python() -> Result<(), Box<dyn std::error::Error>> {
    // An empty PATH means action 2 cannot resolve `python`.
    let empty = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.env("PATH", empty.path());
    cmd.write_stdin("2\n\n5\n");
    cmd.assert().success().stdout(predicate::str::contains(
        "No default 'python' executable found in PATH.",
    ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_discovers_interpreter_from_path() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new()?;
    let python = dir.path().join("python");
    std::fs::write(&python, "#!/bin/sh\necho \"Python 9.9.9\"\n")?;
    std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755))?;

    let mut cmd = Command::new(cargo_bin("pytower"));
    cmd.env("PATH", dir.path());
    cmd.write_stdin("1\n\n5\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Checking for Python installations on this system...",
        ))
        .stdout(predicate::str::contains("Python 9.9.9"));
    Ok(())
}
