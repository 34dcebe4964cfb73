//! PyTower CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pytower::menu::MenuController;
use pytower::ui::TerminalConsole;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PyTower - Python installation administration.
#[derive(Debug, Parser)]
#[command(name = "pytower")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Diagnostics go to stderr so they never interleave with the menu.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pytower=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pytower=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Install a no-op SIGINT handler.
///
/// With a handler in place and SA_RESTART left off, a Ctrl-C while the
/// menu waits on stdin makes the read fail with `Interrupted` instead of
/// killing the process, so the loop can print its farewell and exit 0.
#[cfg(unix)]
fn install_interrupt_handler() {
    unsafe extern "C" fn handler(_signal: libc::c_int) {}

    // SAFETY: the handler does nothing signal-unsafe, and sigaction is
    // given a zeroed struct with the mask explicitly emptied.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handler as *const () as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&mut action.sa_mask);
        libc::sigaction(libc::SIGINT, &action, std::ptr::null_mut());
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler() {}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("PyTower starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    install_interrupt_handler();

    let mut console = TerminalConsole::new();
    MenuController::new(&mut console).run();

    ExitCode::SUCCESS
}
