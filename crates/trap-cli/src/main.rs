//! Trap host application
//!
//! Registers the built-in demo suites, runs them, and prints the canonical
//! report. The process exit code is the number of failed cases (clamped to
//! 255), so an all-green run exits 0.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use trap_runtime::{Registry, Session};

mod demo;

/// Host application for the trap test runtime.
///
/// EXAMPLES:
///     trap                  Run the demo suites
///     trap --json           Also print the final counters as JSON
#[derive(Parser)]
#[command(name = "trap")]
#[command(version)]
struct Cli {
    /// Print the final counters as JSON after the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut registry = Registry::new();
    demo::register(&mut registry)?;

    let mut session = Session::new(registry);
    let failed = session.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&session.counters())?);
    }

    Ok(ExitCode::from(failed.clamp(0, 255) as u8))
}
