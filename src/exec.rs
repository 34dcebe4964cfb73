//! External process execution.
//!
//! Every interpreter probe and pip operation funnels through [`run`]: spawn
//! with piped output, drain both streams on reader threads, and optionally
//! enforce a wall-clock budget by polling the child and killing it when the
//! budget runs out.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{PytowerError, Result};

/// How often a time-bounded child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of running an external command to completion.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl ExecOutcome {
    /// Create a success outcome.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure outcome.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout and stderr concatenated and trimmed, for probes that treat
    /// the child's streams as one (the way `2>&1` would).
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined.trim().to_string()
    }
}

/// Run `program` with `args`, capturing both output streams.
///
/// A non-zero exit is a normal [`ExecOutcome`] with `success == false`;
/// only a failed spawn or an overrun time budget is an `Err`. With
/// `timeout == None` the call blocks until the child exits.
pub fn run(program: &Path, args: &[&str], timeout: Option<Duration>) -> Result<ExecOutcome> {
    let command = display_command(program, args);
    let start = Instant::now();

    debug!("running {}", command);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PytowerError::Launch {
            command: command.clone(),
            source: e,
        })?;

    let stdout = child.stdout.take().unwrap();
    let stderr = child.stderr.take().unwrap();

    // Drain the pipes on their own threads so a chatty child can't fill a
    // pipe buffer and deadlock against our wait.
    let stdout_handle = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
        }
        output
    });

    let stderr_handle = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
        }
        output
    });

    let status = match timeout {
        Some(limit) => loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if start.elapsed() >= limit {
                child.kill().ok();
                child.wait().ok();
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                debug!("{} killed after {:?}", command, start.elapsed());
                return Err(PytowerError::Timeout {
                    command,
                    secs: limit.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        },
        None => child.wait()?,
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    debug!("{} finished in {:?} (exit {:?})", command, duration, status.code());

    if status.success() {
        Ok(ExecOutcome::success(stdout, stderr, duration))
    } else {
        Ok(ExecOutcome::failure(status.code(), stdout, stderr, duration))
    }
}

fn display_command(program: &Path, args: &[&str]) -> String {
    format!("{} {}", program.display(), args.join(" "))
}
