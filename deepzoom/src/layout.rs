//! On-disk layout of a Deep Zoom pyramid.
//!
//! ```text
//! <base>.dzi
//! <base>_files/
//!     0/0_0.jpg
//!     1/0_0.jpg
//!     ...
//!     10/0_0.jpg  10/0_1.jpg  10/1_0.jpg ...
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeepZoomError, DeepZoomResult};

/// Paths derived from an output base path (the path without extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base: PathBuf,
}

impl OutputLayout {
    /// Create a layout for `base`, e.g. `public/assets/workflow`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `<base>.dzi`
    pub fn descriptor_path(&self) -> PathBuf {
        self.with_suffix(".dzi")
    }

    /// `<base>_files`
    pub fn tiles_dir(&self) -> PathBuf {
        self.with_suffix("_files")
    }

    /// `<base>_files/<level>`
    pub fn level_dir(&self, level: u32) -> PathBuf {
        self.tiles_dir().join(level.to_string())
    }

    /// `<base>_files/<level>/<col>_<row>.<extension>`
    pub fn tile_path(&self, level: u32, col: u32, row: u32, extension: &str) -> PathBuf {
        self.level_dir(level)
            .join(format!("{}_{}.{}", col, row, extension))
    }

    /// Create the tiles directory and any missing parents.
    pub fn create_tiles_dir(&self) -> DeepZoomResult<PathBuf> {
        let dir = self.tiles_dir();
        create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Create the directory for `level`.
    pub fn create_level_dir(&self, level: u32) -> DeepZoomResult<PathBuf> {
        let dir = self.level_dir(level);
        create_dir_all(&dir)?;
        Ok(dir)
    }

    // Appends to the file name rather than using set_extension, so a base
    // like "scan.v2" keeps its dot.
    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }
}

fn create_dir_all(path: &Path) -> DeepZoomResult<()> {
    fs::create_dir_all(path).map_err(|source| DeepZoomError::CreateDirectoryFailed {
        path: path.to_path_buf(),
        source,
    })
}
