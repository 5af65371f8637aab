//! # json-shape
//!
//! Command-line front end for `json_shape`: loads a type registry document and prints the
//! JSON shape of type expressions, per-property descriptions of registered types, or the
//! registered names.
//!
//! Command output goes to stdout; diagnostics and error reports go to stderr.

use std::process::ExitCode;

use args::CliArgs;
use clap::Parser;

mod args;
mod commands;
mod error;
mod logging;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    args.log_level.init_stderr_tracing();

    match commands::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}
