//! Gradebook binary entry point.
//!
//! Initializes logging, constructs the single in-memory [`StudentSystem`]
//! owned by the session, and hands stdin/stdout to the interactive menu.
//! Nothing is persisted; exiting the menu discards all data.

use clap::Parser;
use gradebook::menu;
use gradebook_core::StudentSystem;
use std::io;
use tracing_subscriber::EnvFilter;

/// Interactive in-memory student-records manager.
#[derive(Debug, Parser)]
#[command(name = "gradebook", version, about)]
struct Cli {
    /// Tracing filter, e.g. "debug" or "gradebook=trace". Logs go to stderr
    /// so they never interleave with menu output.
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut system = StudentSystem::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&mut system, &mut stdin.lock(), &mut stdout.lock())
}
