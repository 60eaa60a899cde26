//! Arguments and option resolution shared by both tools.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args};
use deepzoom::{ConfigFile, TilingOptions};
use tracing::debug;

use crate::error::CliError;

/// Arguments accepted by `dzi-tiles` and `dzi-save`.
#[derive(Debug, Clone, Args)]
pub struct PyramidArgs {
    /// Source image (PNG, JPEG, TIFF, WebP, ...)
    pub input: PathBuf,

    /// Output base path; writes <BASE>.dzi and <BASE>_files/
    pub output: PathBuf,

    /// Tile edge length in pixels, excluding overlap [default: 254]
    #[arg(long, value_name = "PIXELS")]
    pub tile_size: Option<u32>,

    /// Pixels shared with each neighbouring tile [default: 1]
    #[arg(long, value_name = "PIXELS")]
    pub overlap: Option<u32>,

    /// JPEG quality, 1-100 [default: 90]
    #[arg(long, value_name = "QUALITY")]
    pub quality: Option<u8>,

    /// Read defaults from this INI file instead of the per-user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Resolve tiling options: CLI flag, then config file, then default.
///
/// The config file is the one named by `--config`, else the per-user file
/// when it exists.
pub fn resolve_options(args: &PyramidArgs) -> Result<TilingOptions, CliError> {
    let config = load_config(args.config.as_deref())?;
    resolve_with_config(args, config.as_ref())
}

/// Apply `config` and then the CLI flags on top of the defaults, and validate.
pub fn resolve_with_config(
    args: &PyramidArgs,
    config: Option<&ConfigFile>,
) -> Result<TilingOptions, CliError> {
    let base = match config {
        Some(config) => config.apply_to(TilingOptions::default()),
        None => TilingOptions::default(),
    };

    let mut options = base;
    if let Some(tile_size) = args.tile_size {
        options = options.with_tile_size(tile_size);
    }
    if let Some(overlap) = args.overlap {
        options = options.with_overlap(overlap);
    }
    if let Some(quality) = args.quality {
        options = options.with_quality(quality);
    }
    options.validate()?;

    debug!(
        tile_size = options.tile_size(),
        overlap = options.overlap(),
        quality = options.quality(),
        from_config = config.is_some(),
        "Resolved tiling options"
    );
    Ok(options)
}

fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>, CliError> {
    match explicit {
        Some(path) => Ok(Some(ConfigFile::load_from(path)?)),
        None => Ok(ConfigFile::load_default()?),
    }
}

/// Reject output bases that cannot carry the `.dzi` / `_files` suffixes.
pub fn validate_output_base(output: &Path) -> Result<(), CliError> {
    if output.file_name().is_none() {
        return Err(CliError::Config(format!(
            "output base must end in a file name, got '{}'",
            output.display()
        )));
    }
    Ok(())
}
