//! bypass-guard - Claude Code PreToolUse hook entry point.
//!
//! Reads one event from stdin and always prints one decision object to
//! stdout, exiting successfully even on faults.

use bypass_guard::hook::run_guarded;

use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Filter directive for stderr diagnostics (e.g. `BYPASS_GUARD_LOG=debug`).
const LOG_ENV: &str = "BYPASS_GUARD_LOG";

fn main() -> ExitCode {
    init_tracing();

    let output = run_guarded(|| {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    });

    println!("{}", output.to_json());
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
