//! `dzi-tiles`: step-by-step pyramid generation with live progress.

use deepzoom::DeepZoomGenerator;

use super::common::{resolve_options, validate_output_base, PyramidArgs};
use crate::error::CliError;
use crate::progress::{print_success, ConsoleProgress};

/// Run the tiling variant.
pub fn run(args: PyramidArgs) -> Result<(), CliError> {
    let options = resolve_options(&args)?;
    validate_output_base(&args.output)?;

    println!("Loading image: {}", args.input.display());

    let mut progress = ConsoleProgress::new(&args.output);
    let summary =
        DeepZoomGenerator::new(options).generate(&args.input, &args.output, &mut progress)?;

    print_success(&summary);
    Ok(())
}
