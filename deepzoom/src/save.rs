//! One-call pyramid generation.
//!
//! [`dzsave`] takes a source path, tile geometry and a tile suffix string and
//! does everything else internally, resampling with `fast_image_resize`.
//! The suffix uses the `.<ext>[<key>=<value>,...]` convention:
//!
//! | Suffix          | Tiles                  |
//! |-----------------|------------------------|
//! | `.jpg`          | JPEG, quality 90       |
//! | `.jpg[Q=75]`    | JPEG, quality 75       |
//! | `.jpeg[Q=95]`   | JPEG, quality 95       |
//!
//! Only JPEG tiles are produced, and they are always named `.jpg`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::config::{TilingOptions, DEFAULT_OVERLAP, DEFAULT_QUALITY, DEFAULT_TILE_SIZE};
use crate::error::{DeepZoomError, DeepZoomResult};
use crate::generator::{DeepZoomGenerator, GenerationSummary, NoProgress};
use crate::resize::FastResizer;

/// Suffix used when none is given.
pub const DEFAULT_SUFFIX: &str = ".jpg[Q=90]";

/// Parsed tile suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSuffix {
    quality: u8,
}

impl TileSuffix {
    /// JPEG suffix with the given quality.
    pub fn jpeg(quality: u8) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for TileSuffix {
    fn default() -> Self {
        Self::jpeg(DEFAULT_QUALITY)
    }
}

impl fmt::Display for TileSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".jpg[Q={}]", self.quality)
    }
}

impl FromStr for TileSuffix {
    type Err = DeepZoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DeepZoomError::InvalidSuffix {
            suffix: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let rest = trimmed
            .strip_prefix('.')
            .ok_or_else(|| invalid("must start with '.'"))?;

        let (extension, options) = match rest.find('[') {
            Some(open) => {
                let inner = rest[open + 1..]
                    .strip_suffix(']')
                    .ok_or_else(|| invalid("missing closing ']'"))?;
                (&rest[..open], Some(inner))
            }
            None => (rest, None),
        };

        if !matches!(extension.to_ascii_lowercase().as_str(), "jpg" | "jpeg") {
            return Err(invalid("only jpg tiles are supported"));
        }

        let mut suffix = TileSuffix::default();
        for option in options.into_iter().flat_map(|o| o.split(',')) {
            let option = option.trim();
            if option.is_empty() {
                continue;
            }
            let (key, value) = option
                .split_once('=')
                .ok_or_else(|| invalid("options must be key=value"))?;
            match key.trim() {
                "Q" | "q" => {
                    let quality: u8 = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid("Q must be a number between 1 and 100"))?;
                    if !(1..=100).contains(&quality) {
                        return Err(invalid("Q must be a number between 1 and 100"));
                    }
                    suffix.quality = quality;
                }
                other => {
                    warn!(suffix = s, option = other, "Ignoring unsupported tile option");
                }
            }
        }
        Ok(suffix)
    }
}

/// Options for [`dzsave`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    pub tile_size: u32,
    pub overlap: u32,
    /// Tile format suffix, e.g. `.jpg[Q=90]`.
    pub suffix: String,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            overlap: DEFAULT_OVERLAP,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl SaveOptions {
    /// Resolve into validated [`TilingOptions`].
    pub fn tiling_options(&self) -> DeepZoomResult<TilingOptions> {
        let suffix: TileSuffix = self.suffix.parse()?;
        let options = TilingOptions::new(self.tile_size, self.overlap, suffix.quality());
        options.validate()?;
        Ok(options)
    }
}

/// Decode `input` and write a complete Deep Zoom pyramid to `output_base`.
///
/// Produces `<output_base>.dzi` and `<output_base>_files/`, exactly like
/// [`DeepZoomGenerator`], in a single call.
///
/// ```no_run
/// use std::path::Path;
/// use deepzoom::{dzsave, SaveOptions};
///
/// let options = SaveOptions {
///     tile_size: 256,
///     overlap: 1,
///     suffix: ".jpg[Q=90]".to_string(),
/// };
/// dzsave(Path::new("scan.tif"), Path::new("out/scan"), &options)?;
/// # Ok::<(), deepzoom::DeepZoomError>(())
/// ```
pub fn dzsave(
    input: &Path,
    output_base: &Path,
    options: &SaveOptions,
) -> DeepZoomResult<GenerationSummary> {
    let tiling = options.tiling_options()?;
    DeepZoomGenerator::new(tiling)
        .with_resizer(FastResizer::new())
        .generate(input, output_base, &mut NoProgress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_suffix() {
        let suffix: TileSuffix = DEFAULT_SUFFIX.parse().unwrap();
        assert_eq!(suffix.quality(), 90);
    }

    #[test]
    fn test_parse_without_options() {
        assert_eq!(".jpg".parse::<TileSuffix>().unwrap(), TileSuffix::jpeg(90));
        assert_eq!(".JPEG".parse::<TileSuffix>().unwrap(), TileSuffix::jpeg(90));
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(".jpg[Q=75]".parse::<TileSuffix>().unwrap().quality(), 75);
        assert_eq!(".jpeg[ Q = 100 ]".parse::<TileSuffix>().unwrap().quality(), 100);
    }

    #[test]
    fn test_parse_ignores_unknown_options() {
        let suffix: TileSuffix = ".jpg[optimize_coding=true,Q=80]".parse().unwrap();
        assert_eq!(suffix.quality(), 80);
    }

    #[test]
    fn test_parse_rejects_bare_option() {
        let result = ".jpg[Q=80,strip]".parse::<TileSuffix>();
        assert!(matches!(result, Err(DeepZoomError::InvalidSuffix { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_suffixes() {
        for bad in ["jpg", ".png", ".jpg[Q=0]", ".jpg[Q=101]", ".jpg[Q=high]", ".jpg[Q=90"] {
            let result = bad.parse::<TileSuffix>();
            assert!(
                matches!(result, Err(DeepZoomError::InvalidSuffix { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        let suffix = TileSuffix::jpeg(42);
        assert_eq!(suffix.to_string(), ".jpg[Q=42]");
        assert_eq!(suffix.to_string().parse::<TileSuffix>().unwrap(), suffix);
    }

    #[test]
    fn test_save_options_resolve() {
        let options = SaveOptions {
            tile_size: 256,
            overlap: 1,
            suffix: ".jpg[Q=70]".to_string(),
        };
        assert_eq!(
            options.tiling_options().unwrap(),
            TilingOptions::new(256, 1, 70)
        );
    }

    #[test]
    fn test_save_options_validate_geometry() {
        let options = SaveOptions {
            tile_size: 1,
            overlap: 1,
            ..SaveOptions::default()
        };
        assert!(matches!(
            options.tiling_options(),
            Err(DeepZoomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_dzsave_bad_suffix_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        image::RgbImage::new(8, 8).save(&input).unwrap();
        let base = dir.path().join("out");
        let options = SaveOptions {
            suffix: ".webp".to_string(),
            ..SaveOptions::default()
        };

        assert!(dzsave(&input, &base, &options).is_err());
        assert!(!dir.path().join("out_files").exists());
        assert!(!dir.path().join("out.dzi").exists());
    }
}
