//! Resampling backends for building pyramid levels.
//!
//! The [`LevelResizer`] trait lets the generator build levels with any
//! resampler without depending on a specific imaging crate.
//!
//! ```text
//! ┌────────────────────┐
//! │ DeepZoomGenerator  │
//! │                    │
//! │ Box<dyn LevelResizer>
//! └─────────┬──────────┘
//!           │
//!      ┌────┴─────┐
//!      ▼          ▼
//! ┌──────────┐ ┌──────────┐
//! │ Lanczos  │ │  Fast    │
//! │ (image)  │ │ (fir)    │
//! └──────────┘ └──────────┘
//! ```
//!
//! Both backends use a Lanczos3 kernel and always resample from the
//! full-resolution source, so the two produce near-identical levels.

mod fast;
mod lanczos;

pub use fast::FastResizer;
pub use lanczos::LanczosResizer;

use std::borrow::Cow;

use image::RgbImage;

use crate::error::DeepZoomResult;

/// Resamples an RGB image to a target size.
pub trait LevelResizer {
    /// Resize `source` to exactly `width`×`height`.
    fn resize(&mut self, source: &RgbImage, width: u32, height: u32) -> DeepZoomResult<RgbImage>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}

/// Produce a level image, borrowing the source when no resampling is needed.
pub fn resize_level<'a>(
    resizer: &mut dyn LevelResizer,
    source: &'a RgbImage,
    width: u32,
    height: u32,
) -> DeepZoomResult<Cow<'a, RgbImage>> {
    if source.dimensions() == (width, height) {
        return Ok(Cow::Borrowed(source));
    }
    resizer.resize(source, width, height).map(Cow::Owned)
}
