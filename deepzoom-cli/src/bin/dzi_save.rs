//! dzi-save - generate a Deep Zoom pyramid with a single library call.

use std::process::ExitCode;

use clap::Parser;
use deepzoom::logging::init_logging;
use deepzoom_cli::commands::common::PyramidArgs;
use deepzoom_cli::commands::save;

/// Write a Deep Zoom pyramid (.dzi plus tiles) in one call to dzsave.
#[derive(Debug, Parser)]
#[command(name = "dzi-save", version, about)]
struct Cli {
    #[command(flatten)]
    args: PyramidArgs,
}

fn main() -> ExitCode {
    let cli = match deepzoom_cli::parse_args::<Cli>() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    init_logging(cli.args.verbose);

    deepzoom_cli::report(save::run(cli.args))
}
