//! `dzi-save`: hand the whole job to [`deepzoom::dzsave`].

use deepzoom::{dzsave, OutputLayout, SaveOptions, TileSuffix};
use tracing::info;

use super::common::{resolve_options, validate_output_base, PyramidArgs};
use crate::error::CliError;
use crate::progress::{print_destination, print_success};

/// Run the delegated variant.
pub fn run(args: PyramidArgs) -> Result<(), CliError> {
    let options = resolve_options(&args)?;
    validate_output_base(&args.output)?;

    let save_options = SaveOptions {
        tile_size: options.tile_size(),
        overlap: options.overlap(),
        suffix: TileSuffix::jpeg(options.quality()).to_string(),
    };
    info!(suffix = %save_options.suffix, "Delegating to dzsave");

    println!("Loading image: {}", args.input.display());
    print_destination(&OutputLayout::new(&args.output));

    let summary = dzsave(&args.input, &args.output, &save_options)?;

    print_success(&summary);
    Ok(())
}
