//! Pyramid level planning.
//!
//! A Deep Zoom pyramid doubles resolution per level, starting from a level 0
//! that is (close to) 1×1 and ending at `max_level`, which has exactly the
//! source dimensions.
//!
//! ```text
//! level        scale   600×400 source
//! ─────        ─────   ──────────────
//! 10 (max)     1       600×400
//!  9           2       300×200
//!  8           4       150×100
//!  ...
//!  1           512     2×1
//!  0           1024    1×1
//! ```
//!
//! Each level is split into tiles by [`LevelPlan`], see [`tile`].

pub mod tile;

pub use tile::{LevelPlan, TileRect};

use crate::config::TilingOptions;
use crate::error::{DeepZoomError, DeepZoomResult};

/// Highest level index for an image: `ceil(log2(max(width, height)))`.
///
/// Computed with integer arithmetic so powers of two are exact.
///
/// ```
/// assert_eq!(deepzoom::pyramid::max_level(600, 400), 10);
/// assert_eq!(deepzoom::pyramid::max_level(512, 512), 9);
/// assert_eq!(deepzoom::pyramid::max_level(1, 1), 0);
/// ```
pub fn max_level(width: u32, height: u32) -> u32 {
    let longest = width.max(height).max(1);
    u32::BITS - (longest - 1).leading_zeros()
}

/// Dimensions of `level` for a source of `width`×`height` with the given
/// `max_level`: the source divided by `2^(max_level - level)`, rounded up.
pub fn level_dimensions(width: u32, height: u32, max_level: u32, level: u32) -> (u32, u32) {
    debug_assert!(level <= max_level);
    let scale = 1u64 << (max_level - level);
    (
        (width as u64).div_ceil(scale) as u32,
        (height as u64).div_ceil(scale) as u32,
    )
}

/// Complete plan of every level and tile for one source image.
#[derive(Debug, Clone)]
pub struct PyramidPlan {
    width: u32,
    height: u32,
    options: TilingOptions,
    levels: Vec<LevelPlan>,
}

impl PyramidPlan {
    /// Plan a pyramid for a `width`×`height` source.
    ///
    /// # Errors
    ///
    /// Returns [`DeepZoomError::InvalidConfig`] if the options are invalid or
    /// the source has a zero dimension.
    pub fn new(width: u32, height: u32, options: TilingOptions) -> DeepZoomResult<Self> {
        options.validate()?;
        if width == 0 || height == 0 {
            return Err(DeepZoomError::config(format!(
                "source image has no pixels ({}×{})",
                width, height
            )));
        }

        let top = max_level(width, height);
        let levels = (0..=top)
            .map(|level| {
                let (w, h) = level_dimensions(width, height, top, level);
                LevelPlan::new(level, w, h, options.tile_size(), options.overlap())
            })
            .collect();

        Ok(Self {
            width,
            height,
            options,
            levels,
        })
    }

    /// Full-resolution width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Full-resolution height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn options(&self) -> &TilingOptions {
        &self.options
    }

    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32 - 1
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// All levels, smallest first.
    pub fn levels(&self) -> &[LevelPlan] {
        &self.levels
    }

    pub fn level(&self, level: u32) -> Option<&LevelPlan> {
        self.levels.get(level as usize)
    }

    /// Number of tiles across every level.
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(LevelPlan::tile_count).sum()
    }
}
