//! # Valeo Console Entry Point
//!
//! ```text
//! $ valeo-console --today 2025-10-05
//! > simulate
//! {"ok":true,"data":{...},"feedback":[{"type":"toast","level":"success",...}]}
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use valeo_console_lib::Cli;

fn main() -> ExitCode {
    match valeo_console_lib::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("valeo-console: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
