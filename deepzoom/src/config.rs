//! Tiling options and the optional INI configuration file.
//!
//! Settings resolve in three layers: command-line flag, then config file,
//! then the built-in defaults below. The config file is plain INI:
//!
//! ```ini
//! [deepzoom]
//! tile_size = 254
//! overlap = 1
//! quality = 90
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use crate::error::{DeepZoomError, DeepZoomResult};

/// Default tile edge length in pixels, excluding overlap.
///
/// 254 plus one pixel of overlap on each interior side gives 256-pixel
/// interior tiles.
pub const DEFAULT_TILE_SIZE: u32 = 254;

/// Default overlap between neighbouring tiles in pixels.
pub const DEFAULT_OVERLAP: u32 = 1;

/// Default JPEG quality (1-100).
pub const DEFAULT_QUALITY: u8 = 90;

/// INI section holding the tiling keys.
pub const CONFIG_SECTION: &str = "deepzoom";

/// Geometry and encoding settings for one pyramid.
///
/// # Example
///
/// ```
/// use deepzoom::TilingOptions;
///
/// let options = TilingOptions::default().with_tile_size(512).with_overlap(2);
/// assert_eq!(options.tile_size(), 512);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingOptions {
    tile_size: u32,
    overlap: u32,
    quality: u8,
}

impl Default for TilingOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            overlap: DEFAULT_OVERLAP,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl TilingOptions {
    /// Create options with explicit values. Call [`validate`](Self::validate)
    /// before use.
    pub fn new(tile_size: u32, overlap: u32, quality: u8) -> Self {
        Self {
            tile_size,
            overlap,
            quality,
        }
    }

    /// Set the tile size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: u32) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the JPEG quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn overlap(&self) -> u32 {
        self.overlap
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Check that the options describe a valid tiling.
    ///
    /// The overlap must be strictly smaller than the tile size, otherwise a
    /// tile's origin would fall before its left neighbour's.
    pub fn validate(&self) -> DeepZoomResult<()> {
        if self.tile_size == 0 {
            return Err(DeepZoomError::config("tile size must be at least 1"));
        }
        if self.overlap >= self.tile_size {
            return Err(DeepZoomError::config(format!(
                "overlap ({}) must be smaller than tile size ({})",
                self.overlap, self.tile_size
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(DeepZoomError::config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Values read from a config file. Unset keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub tile_size: Option<u32>,
    pub overlap: Option<u32>,
    pub quality: Option<u8>,
}

impl ConfigFile {
    /// Load a config file from an explicit path.
    pub fn load_from(path: &Path) -> DeepZoomResult<Self> {
        let ini = Ini::load_from_file(path).map_err(|e| DeepZoomError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini, path)
    }

    /// Load the per-user config file if one exists.
    ///
    /// Returns `Ok(None)` when there is no config directory or no file in it.
    pub fn load_default() -> DeepZoomResult<Option<Self>> {
        match config_file_path() {
            Some(path) if path.is_file() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    /// Parse config file contents. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> DeepZoomResult<Self> {
        let ini = Ini::load_from_str(contents).map_err(|e| DeepZoomError::ConfigFile {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini, origin)
    }

    fn from_ini(ini: &Ini, origin: &Path) -> DeepZoomResult<Self> {
        let Some(section) = ini.section(Some(CONFIG_SECTION)) else {
            return Ok(Self::default());
        };

        Ok(Self {
            tile_size: parse_key(section.get("tile_size"), "tile_size", origin)?,
            overlap: parse_key(section.get("overlap"), "overlap", origin)?,
            quality: parse_key(section.get("quality"), "quality", origin)?,
        })
    }

    /// Overlay the values present in this file on top of `base`.
    pub fn apply_to(&self, base: TilingOptions) -> TilingOptions {
        TilingOptions {
            tile_size: self.tile_size.unwrap_or(base.tile_size),
            overlap: self.overlap.unwrap_or(base.overlap),
            quality: self.quality.unwrap_or(base.quality),
        }
    }
}

fn parse_key<T: FromStr>(value: Option<&str>, key: &str, origin: &Path) -> DeepZoomResult<Option<T>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| DeepZoomError::ConfigFile {
            path: origin.to_path_buf(),
            reason: format!("{}.{} has invalid value '{}'", CONFIG_SECTION, key, raw),
        })
}

/// Location of the per-user config file, e.g. `~/.config/deepzoom/config.ini`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deepzoom").join("config.ini"))
}
