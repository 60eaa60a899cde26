//! SIMD resampling with `fast_image_resize`.

use fast_image_resize as fir;
use fir::images::Image;
use fir::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

use super::LevelResizer;
use crate::error::{DeepZoomError, DeepZoomResult};

/// Lanczos3 convolution resampler from `fast_image_resize`.
///
/// Keeps one [`Resizer`] alive across levels so its scratch buffers are
/// reused.
pub struct FastResizer {
    resizer: Resizer,
    options: ResizeOptions,
}

impl FastResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        }
    }
}

impl Default for FastResizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelResizer for FastResizer {
    fn resize(&mut self, source: &RgbImage, width: u32, height: u32) -> DeepZoomResult<RgbImage> {
        let fail = |reason: String| DeepZoomError::Resize {
            width,
            height,
            reason,
        };

        let src = Image::from_vec_u8(
            source.width(),
            source.height(),
            source.as_raw().clone(),
            PixelType::U8x3,
        )
        .map_err(|e| fail(e.to_string()))?;
        let mut dst = Image::new(width, height, PixelType::U8x3);

        self.resizer
            .resize(&src, &mut dst, &self.options)
            .map_err(|e| fail(e.to_string()))?;

        RgbImage::from_raw(width, height, dst.into_vec())
            .ok_or_else(|| fail("output buffer has unexpected length".to_string()))
    }

    fn name(&self) -> &str {
        "fast_image_resize/lanczos3"
    }
}
