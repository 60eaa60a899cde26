//! Pyramid generation.
//!
//! [`DeepZoomGenerator`] runs the whole pipeline for one source image:
//!
//! ```text
//! load source ─► plan levels ─► for each level: resize ─► crop tiles ─► encode ─► write
//!                                                                              │
//!                                                       write <base>.dzi ◄─────┘
//! ```
//!
//! The source is decoded before anything touches the disk, so a missing or
//! corrupt input leaves no output behind. The descriptor is written last.
//! A failure part-way through leaves the tiles written so far in place.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops;
use image::RgbImage;
use tracing::{debug, info};

use crate::config::TilingOptions;
use crate::descriptor::DziDescriptor;
use crate::encode::{JpegTileEncoder, TileEncoder};
use crate::error::{DeepZoomError, DeepZoomResult};
use crate::layout::OutputLayout;
use crate::pyramid::{LevelPlan, PyramidPlan, TileRect};
use crate::resize::{resize_level, LanczosResizer, LevelResizer};
use crate::source::SourceImage;

/// Receives progress events during generation.
///
/// Every method has an empty default, so observers implement only what they
/// display.
pub trait ProgressObserver {
    fn source_loaded(&mut self, _source: &SourceImage, _plan: &PyramidPlan) {}

    fn level_started(&mut self, _level: &LevelPlan) {}

    fn tile_written(&mut self, _level: &LevelPlan, _tile: &TileRect, _path: &Path) {}

    fn level_finished(&mut self, _level: &LevelPlan, _tiles_written: u64) {}

    fn finished(&mut self, _summary: &GenerationSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Full-resolution width.
    pub width: u32,
    /// Full-resolution height.
    pub height: u32,
    /// Number of levels written (`max_level + 1`).
    pub levels: usize,
    pub tiles_written: u64,
    pub descriptor_path: PathBuf,
    pub tiles_dir: PathBuf,
}

/// Builds Deep Zoom pyramids with a pluggable resampler and tile encoder.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use deepzoom::{DeepZoomGenerator, NoProgress, TilingOptions};
///
/// let mut generator = DeepZoomGenerator::new(TilingOptions::default());
/// let summary = generator.generate(
///     Path::new("workflow.png"),
///     Path::new("public/workflow"),
///     &mut NoProgress,
/// )?;
/// println!("{} tiles in {} levels", summary.tiles_written, summary.levels);
/// # Ok::<(), deepzoom::DeepZoomError>(())
/// ```
pub struct DeepZoomGenerator {
    options: TilingOptions,
    resizer: Box<dyn LevelResizer>,
    encoder: Box<dyn TileEncoder>,
}

impl DeepZoomGenerator {
    /// Create a generator using Lanczos3 resampling from the `image` crate and
    /// JPEG tiles at `options.quality()`.
    pub fn new(options: TilingOptions) -> Self {
        Self {
            options,
            resizer: Box::new(LanczosResizer),
            encoder: Box::new(JpegTileEncoder::new(options.quality())),
        }
    }

    /// Replace the resampling backend.
    pub fn with_resizer(mut self, resizer: impl LevelResizer + 'static) -> Self {
        self.resizer = Box::new(resizer);
        self
    }

    /// Replace the tile encoder. The encoder's own quality setting wins over
    /// `TilingOptions::quality`.
    pub fn with_encoder(mut self, encoder: impl TileEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn options(&self) -> &TilingOptions {
        &self.options
    }

    /// Load `input` and write the pyramid to `output_base`.
    ///
    /// Writes `<output_base>.dzi` and `<output_base>_files/`.
    ///
    /// # Errors
    ///
    /// Options are validated and the source is decoded before any output is
    /// created; see [`DeepZoomError`] for the failure kinds.
    pub fn generate(
        &mut self,
        input: &Path,
        output_base: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> DeepZoomResult<GenerationSummary> {
        self.options.validate()?;
        let source = SourceImage::load(input)?;
        self.generate_from_source(&source, output_base, progress)
    }

    /// Write the pyramid for an already loaded source.
    pub fn generate_from_source(
        &mut self,
        source: &SourceImage,
        output_base: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> DeepZoomResult<GenerationSummary> {
        let plan = PyramidPlan::new(source.width(), source.height(), self.options)?;
        progress.source_loaded(source, &plan);

        info!(
            width = plan.width(),
            height = plan.height(),
            levels = plan.level_count(),
            tiles = plan.total_tiles(),
            resizer = self.resizer.name(),
            encoder = self.encoder.name(),
            "Generating Deep Zoom pyramid"
        );

        let layout = OutputLayout::new(output_base);
        let tiles_dir = layout.create_tiles_dir()?;

        let mut tiles_written = 0u64;
        for level in plan.levels() {
            progress.level_started(level);

            let level_image = resize_level(
                self.resizer.as_mut(),
                source.image(),
                level.width(),
                level.height(),
            )?;
            layout.create_level_dir(level.level())?;

            let mut written = 0u64;
            for rect in level.tiles() {
                let path = layout.tile_path(level.level(), rect.col, rect.row, self.encoder.extension());
                self.write_tile(&level_image, level, &rect, &path)?;
                progress.tile_written(level, &rect, &path);
                written += 1;
            }

            info!(
                level = level.level(),
                width = level.width(),
                height = level.height(),
                columns = level.columns(),
                rows = level.rows(),
                tiles = written,
                "Level complete"
            );
            progress.level_finished(level, written);
            tiles_written += written;
        }

        let descriptor = DziDescriptor::new(
            plan.width(),
            plan.height(),
            self.options.tile_size(),
            self.options.overlap(),
            self.encoder.extension(),
        );
        let descriptor_path = layout.descriptor_path();
        descriptor.write_to(&descriptor_path)?;
        debug!(path = %descriptor_path.display(), "Wrote descriptor");

        let summary = GenerationSummary {
            width: plan.width(),
            height: plan.height(),
            levels: plan.level_count(),
            tiles_written,
            descriptor_path,
            tiles_dir,
        };
        progress.finished(&summary);
        Ok(summary)
    }

    fn write_tile(
        &self,
        level_image: &RgbImage,
        level: &LevelPlan,
        rect: &TileRect,
        path: &Path,
    ) -> DeepZoomResult<()> {
        let tile = imageops::crop_imm(level_image, rect.x, rect.y, rect.width, rect.height).to_image();
        let bytes = self
            .encoder
            .encode(&tile)
            .map_err(|e| DeepZoomError::Encode {
                level: level.level(),
                col: rect.col,
                row: rect.row,
                reason: e.to_string(),
            })?;

        fs::write(path, bytes).map_err(|source| DeepZoomError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            level = level.level(),
            col = rect.col,
            row = rect.row,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Wrote tile"
        );
        Ok(())
    }
}
