//! Shared implementation of the `dzi-tiles` and `dzi-save` binaries.
//!
//! Both tools take the same arguments ([`commands::common::PyramidArgs`]),
//! print the same progress lines and follow the same exit-code contract:
//! 0 on success, 1 with `ERROR: <message>` on stderr for any failure.

use std::process::ExitCode;

use clap::Parser;

pub mod commands;
pub mod error;
pub mod progress;

pub use error::CliError;

/// Parse the process arguments.
///
/// `--help` and `--version` print and exit with status 0 as usual. Usage
/// errors are printed by clap and returned as exit status 1.
pub fn parse_args<P: Parser>() -> Result<P, ExitCode> {
    match P::try_parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            Err(ExitCode::FAILURE)
        }
    }
}

/// Turn a command result into the process exit code, reporting failures.
pub fn report(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
