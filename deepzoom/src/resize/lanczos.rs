//! Resampling with the `image` crate's Lanczos3 filter.

use image::imageops::{self, FilterType};
use image::RgbImage;

use super::LevelResizer;
use crate::error::DeepZoomResult;

/// Lanczos3 resampler from `image::imageops`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl LevelResizer for LanczosResizer {
    fn resize(&mut self, source: &RgbImage, width: u32, height: u32) -> DeepZoomResult<RgbImage> {
        Ok(imageops::resize(source, width, height, FilterType::Lanczos3))
    }

    fn name(&self) -> &str {
        "image/lanczos3"
    }
}
