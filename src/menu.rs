//! The interactive menu loop.
//!
//! One controller owns the console, the discovery sources, and the PyPI
//! client. Every menu action runs a fresh discovery pass; nothing carries
//! over between visits, so the IDs shown in a listing are valid only for
//! the prompts directly beneath it.

use std::time::Duration;

use tracing::debug;

use crate::discovery::{self, is_store_stub, resolve_on_path, Interpreter, SearchPaths};
use crate::error::Result;
use crate::pip::{self, PackageRecord, PipRecord, PyPiClient};
use crate::ui::{Console, Table};

const MAIN_MENU: &[&str] = &[
    "1. Check python installations",
    "2. Check active installation of python",
    "3. Manage Libraries",
    "4. Manage Pip",
    "5. Exit",
];

/// How long error notices stay on screen before the menu redraws.
const NOTICE_PAUSE: Duration = Duration::from_secs(2);

/// What the main loop does after an action completes.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    /// Run the acknowledgement pause and redisplay the menu.
    Continue,
    /// Input ended inside the action; exit with the farewell.
    Quit,
}

/// A parsed ID prompt answer.
enum IdInput {
    Id(usize),
    Invalid,
    Ended,
}

/// Top-level menu controller.
pub struct MenuController<'a> {
    console: &'a mut dyn Console,
    sources: SearchPaths,
    pypi: PyPiClient,
}

impl<'a> MenuController<'a> {
    /// Controller over the real environment and the public index.
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self {
            console,
            sources: SearchPaths::from_environment(),
            pypi: PyPiClient::new(),
        }
    }

    /// Controller with explicit sources and index client, for tests.
    pub fn with_sources(
        console: &'a mut dyn Console,
        sources: SearchPaths,
        pypi: PyPiClient,
    ) -> Self {
        Self {
            console,
            sources,
            pypi,
        }
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run(&mut self) {
        loop {
            self.banner();
            self.menu();
            let choice = match self.console.read_line("Enter your choice (1-5): ") {
                Ok(Some(choice)) => choice,
                Ok(None) => {
                    self.farewell();
                    return;
                }
                Err(e) => {
                    self.report_error(&e.to_string());
                    continue;
                }
            };
            debug!("main menu selection: {:?}", choice.trim());
            let outcome = match choice.trim() {
                "1" => Some(self.check_installations()),
                "2" => Some(self.check_active()),
                "3" => Some(self.manage_libraries()),
                "4" => Some(self.manage_pip()),
                "5" => {
                    self.farewell();
                    return;
                }
                _ => {
                    self.console
                        .error("Invalid choice. Please enter 1, 2, 3, 4, or 5.");
                    self.console.pause(NOTICE_PAUSE);
                    self.console.clear_screen();
                    None
                }
            };
            match outcome {
                None => {}
                Some(Ok(Flow::Quit)) => {
                    self.farewell();
                    return;
                }
                Some(Ok(Flow::Continue)) => {
                    if self.acknowledge().is_none() {
                        self.farewell();
                        return;
                    }
                }
                Some(Err(e)) => self.report_error(&e.to_string()),
            }
        }
    }

    fn banner(&mut self) {
        let rule = "=".repeat(100);
        self.console.message(&rule);
        self.console
            .header("PyTower - Python installation administration");
        self.console.message(&rule);
        self.console.message("Welcome to PyTower!");
        self.console.message("");
    }

    fn menu(&mut self) {
        let rule = "=".repeat(40);
        self.console.message("Available Options:");
        self.console.message(&rule);
        for item in MAIN_MENU {
            self.console.message(item);
        }
        self.console.message(&rule);
    }

    fn farewell(&mut self) {
        self.console.message("Thank you for using PyTower!");
    }

    fn report_error(&mut self, error: &str) {
        self.console.error(&format!("An error occurred: {}", error));
        self.console.pause(NOTICE_PAUSE);
        self.console.clear_screen();
    }

    /// The action-level pause before the menu redraws.
    fn acknowledge(&mut self) -> Option<()> {
        match self.console.read_line("\nPress Enter to continue...") {
            Ok(Some(_)) => {
                self.console.clear_screen();
                Some(())
            }
            _ => None,
        }
    }

    /// Fresh discovery pass behind a spinner.
    fn discover(&mut self) -> Vec<Interpreter> {
        let mut spinner = self.console.start_spinner("Probing Python interpreters...");
        let pass = discovery::discover(&self.sources);
        spinner.finish_and_clear();
        pass.records
    }

    fn check_installations(&mut self) -> Result<Flow> {
        self.console
            .message("\nChecking for Python installations on this system...\n");
        let records = self.discover();
        if records.is_empty() {
            self.console.warning("No Python installations found.");
        } else {
            self.console.message(&installations_table(&records));
        }
        self.console.message("");
        Ok(Flow::Continue)
    }

    fn check_active(&mut self) -> Result<Flow> {
        self.console
            .message("\nChecking active/default Python installation...\n");
        match resolve_on_path("python", &self.sources.path_entries) {
            Some(path) => {
                let version = discovery::probe_version(&path);
                let label = if is_store_stub(&path) {
                    " (Microsoft Store alias)"
                } else {
                    ""
                };
                self.console.message(&format!(
                    "Default python executable: {}{}",
                    path.display(),
                    label
                ));
                self.console.message(&format!("Version: {}", version));
            }
            None => self
                .console
                .warning("No default 'python' executable found in PATH."),
        }
        self.console.message("");
        Ok(Flow::Continue)
    }

    fn manage_libraries(&mut self) -> Result<Flow> {
        self.console
            .message("\nManaging libraries for all Python installations...\n");
        let interpreters = self.discover();
        let mut spinner = self.console.start_spinner("Listing installed packages...");
        let records = pip::collect_packages(&interpreters);
        spinner.finish_and_clear();

        if records.is_empty() {
            self.console
                .warning("No Python libraries found for any detected installation.");
            self.console.message("");
            return Ok(Flow::Continue);
        }

        self.console.message(&libraries_table(&records));
        self.console.message("\nOptions:");
        self.console.message("1. Remove library");
        self.console.message("2. Back to main menu");
        loop {
            let choice = match self.console.read_line("Enter your choice (1-2): ")? {
                Some(choice) => choice,
                None => return Ok(Flow::Quit),
            };
            match choice.trim() {
                "1" => {
                    let record = match self.read_id("Enter the ID of the library to remove: ")? {
                        IdInput::Id(id) => match records.iter().find(|r| r.id == id) {
                            Some(record) => record.clone(),
                            None => {
                                self.console.error("No library found with that ID.");
                                continue;
                            }
                        },
                        IdInput::Invalid => continue,
                        IdInput::Ended => return Ok(Flow::Quit),
                    };
                    self.remove_library(&record);
                    return match self.console.read_line("\nPress Enter to continue...")? {
                        Some(_) => Ok(Flow::Continue),
                        None => Ok(Flow::Quit),
                    };
                }
                "2" => return Ok(Flow::Continue),
                _ => self.console.error("Invalid choice. Please enter 1 or 2."),
            }
        }
    }

    fn remove_library(&mut self, record: &PackageRecord) {
        self.console.message(&format!(
            "Uninstalling {} from Python ({}) at {} ...",
            record.name,
            record.interpreter_version,
            record.interpreter_path.display()
        ));
        match pip::uninstall(&record.interpreter_path, &record.name) {
            Ok(outcome) if outcome.success => self.console.success(&format!(
                "Successfully uninstalled {} from {}",
                record.name,
                record.interpreter_path.display()
            )),
            Ok(outcome) => self.console.error(&format!(
                "Failed to uninstall {}: {}",
                record.name, outcome.stderr
            )),
            Err(e) => self.console.error(&format!("Error uninstalling: {}", e)),
        }
    }

    fn manage_pip(&mut self) -> Result<Flow> {
        self.console
            .message("\nManaging pip for all Python installations...\n");
        let interpreters = self.discover();
        let mut spinner = self.console.start_spinner("Probing pip installations...");
        let records = pip::collect_pip_records(&interpreters);
        spinner.finish_and_clear();

        if records.is_empty() {
            self.console
                .warning("No pip installations found for any detected Python installation.");
            self.console.message("");
            return Ok(Flow::Continue);
        }

        self.console.message(&pip_table(&records));
        self.console.message("\nOptions:");
        self.console.message("1. Check All PIPs for updates");
        self.console.message("2. Update All PIPs");
        self.console.message("3. Update specific PIP");
        self.console.message("4. Back to main menu");
        loop {
            let choice = match self.console.read_line("Enter your choice (1-4): ")? {
                Some(choice) => choice,
                None => return Ok(Flow::Quit),
            };
            match choice.trim() {
                "1" => {
                    self.check_pip_updates(&records);
                    self.console.message("");
                    return Ok(Flow::Continue);
                }
                "2" => {
                    self.console.message("\nUpdating all pip installations...");
                    for record in &records {
                        self.upgrade_record(record);
                    }
                    self.console.message("");
                    return Ok(Flow::Continue);
                }
                "3" => {
                    let record = match self.read_id("Enter the ID of the pip to update: ")? {
                        IdInput::Id(id) => match records.iter().find(|r| r.id == id) {
                            Some(record) => record.clone(),
                            None => {
                                self.console.error("No pip found with that ID.");
                                continue;
                            }
                        },
                        IdInput::Invalid => continue,
                        IdInput::Ended => return Ok(Flow::Quit),
                    };
                    self.upgrade_record(&record);
                    self.console.message("");
                    return Ok(Flow::Continue);
                }
                "4" => return Ok(Flow::Continue),
                _ => self
                    .console
                    .error("Invalid choice. Please enter 1, 2, 3, or 4."),
            }
        }
    }

    fn check_pip_updates(&mut self, records: &[PipRecord]) {
        self.console.message("\nChecking for pip updates...");
        let latest = match self.pypi.latest_pip_version() {
            Ok(latest) => Some(latest),
            Err(e) => {
                self.console.warning(&format!(
                    "Could not fetch latest pip version from PyPI: {}",
                    e
                ));
                None
            }
        };
        for record in records {
            let Some(installed) = &record.version else {
                self.console.warning(&format!(
                    "ID {}: pip not installed in {}",
                    record.id,
                    record.interpreter_path.display()
                ));
                continue;
            };
            match &latest {
                Some(latest) if installed != latest => self.console.warning(&format!(
                    "ID {}: Update available for pip in {} (Installed: {}, Latest: {})",
                    record.id,
                    record.interpreter_path.display(),
                    installed,
                    latest
                )),
                Some(_) => self.console.success(&format!(
                    "ID {}: pip is up to date in {} (Version: {})",
                    record.id,
                    record.interpreter_path.display(),
                    installed
                )),
                None => self.console.warning(&format!(
                    "ID {}: Could not determine latest pip version.",
                    record.id
                )),
            }
        }
    }

    fn upgrade_record(&mut self, record: &PipRecord) {
        self.console.message(&format!(
            "Updating pip for Python at {}...",
            record.interpreter_path.display()
        ));
        match pip::upgrade(&record.interpreter_path) {
            Ok(outcome) if outcome.success => self
                .console
                .success(&format!("ID {}: pip updated successfully.", record.id)),
            Ok(outcome) => self.console.error(&format!(
                "ID {}: pip update failed: {}",
                record.id, outcome.stderr
            )),
            Err(e) => self
                .console
                .error(&format!("ID {}: Error updating pip: {}", record.id, e)),
        }
    }

    fn read_id(&mut self, prompt: &str) -> Result<IdInput> {
        let line = match self.console.read_line(prompt)? {
            Some(line) => line,
            None => return Ok(IdInput::Ended),
        };
        match line.trim().parse::<usize>() {
            Ok(id) => Ok(IdInput::Id(id)),
            Err(_) => {
                self.console.error("Invalid ID. Please enter a number.");
                Ok(IdInput::Invalid)
            }
        }
    }
}

fn installations_table(records: &[Interpreter]) -> String {
    let mut table = Table::new(&[("Version", 20), ("Name", 10), ("Path", 60), ("Source", 22)]);
    for record in records {
        table.add_row(vec![
            record.version.to_string(),
            record.name.clone(),
            record.path.display().to_string(),
            store_label(record.store_stub).to_string(),
        ]);
    }
    table.render()
}

fn pip_table(records: &[PipRecord]) -> String {
    let mut table = Table::new(&[
        ("ID", 4),
        ("Python Version", 20),
        ("Pip Version", 40),
        ("Python Path", 60),
        ("Source", 22),
    ]);
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            record.interpreter_version.clone(),
            record.raw_version.clone(),
            record.interpreter_path.display().to_string(),
            store_label(record.store_stub).to_string(),
        ]);
    }
    table.render()
}

/// The libraries table pads its columns but never truncates, and the last
/// column carries the raw path.
fn libraries_table(records: &[PackageRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(format!(
        "{:<4} {:<18} {:<30} {:<15} {}",
        "ID", "Python Version", "Library", "Lib Version", "Python Path"
    ));
    lines.push("-".repeat(90));
    for record in records {
        lines.push(format!(
            "{:<4} {:<18} {:<30} {:<15} {}",
            record.id,
            record.interpreter_version,
            record.name,
            record.version,
            record.interpreter_path.display()
        ));
    }
    lines.join("\n")
}

fn store_label(store_stub: bool) -> &'static str {
    if store_stub {
        "Microsoft Store alias"
    } else {
        ""
    }
}
