//! Tile encoding.
//!
//! The descriptor's `Format` attribute and each tile's file extension both
//! come from [`TileEncoder::extension`], so they can never disagree.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageResult, RgbImage};

/// Encodes a cropped tile to file bytes.
pub trait TileEncoder {
    /// Encode `tile` to a complete image file.
    fn encode(&self, tile: &RgbImage) -> ImageResult<Vec<u8>>;

    /// File extension without the dot, e.g. `"jpg"`.
    fn extension(&self) -> &str;

    /// Human-readable encoder name for logs.
    fn name(&self) -> &str;
}

/// Baseline JPEG encoder.
///
/// # Example
///
/// ```
/// use deepzoom::encode::{JpegTileEncoder, TileEncoder};
///
/// let encoder = JpegTileEncoder::new(90);
/// assert_eq!(encoder.extension(), "jpg");
/// assert_eq!(encoder.quality(), 90);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JpegTileEncoder {
    quality: u8,
}

impl JpegTileEncoder {
    /// Create an encoder with `quality` in 1-100.
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl TileEncoder for JpegTileEncoder {
    fn encode(&self, tile: &RgbImage) -> ImageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality).encode_image(tile)?;
        Ok(bytes)
    }

    fn extension(&self) -> &str {
        "jpg"
    }

    fn name(&self) -> &str {
        "JPEG"
    }
}
