//! dzi-tiles - generate a Deep Zoom pyramid level by level.

use std::process::ExitCode;

use clap::Parser;
use deepzoom::logging::init_logging;
use deepzoom_cli::commands::common::PyramidArgs;
use deepzoom_cli::commands::tiles;

/// Resize, slice and encode every pyramid level, then write the .dzi descriptor.
#[derive(Debug, Parser)]
#[command(name = "dzi-tiles", version, about)]
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

    deepzoom_cli::report(tiles::run(cli.args))
}
