//! Source image loading.
//!
//! The source is decoded once and normalized to 8-bit RGB. JPEG tiles cannot
//! carry transparency, so any alpha channel is composited onto white first.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageReader, Rgb, RgbImage};
use tracing::debug;

use crate::error::{DeepZoomError, DeepZoomResult};

/// A decoded, RGB-normalized source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    image: RgbImage,
    flattened_alpha: bool,
}

impl SourceImage {
    /// Decode the image at `path`.
    ///
    /// The format is sniffed from the file contents, not the extension, and
    /// decoder memory limits are lifted since pyramid sources are large by
    /// nature.
    ///
    /// # Errors
    ///
    /// - [`DeepZoomError::InputNotFound`] if `path` does not exist
    /// - [`DeepZoomError::Decode`] if the file cannot be read or decoded
    pub fn load(path: &Path) -> DeepZoomResult<Self> {
        if !path.exists() {
            return Err(DeepZoomError::InputNotFound(path.to_path_buf()));
        }

        let decode_err = |source: ImageError| DeepZoomError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(ImageError::IoError(e)))?;
        reader.no_limits();
        let decoded = reader.decode().map_err(decode_err)?;

        debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Decoded source image"
        );

        Ok(Self::from_dynamic(path, decoded))
    }

    /// Wrap an already decoded image.
    pub fn from_dynamic(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        let flattened_alpha = image.color().has_alpha();
        Self {
            path: path.into(),
            image: flatten_onto_white(image),
            flattened_alpha,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The RGB pixels.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Whether the decoded image had an alpha channel.
    pub fn flattened_alpha(&self) -> bool {
        self.flattened_alpha
    }
}

/// Convert to RGB8, compositing any alpha channel onto a white background.
pub fn flatten_onto_white(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flat = RgbImage::new(width, height);
    for (dst, src) in flat.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let alpha = a as u32;
        // Rounded c*a + 255*(1-a), in 0..=255 fixed point
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(r), blend(g), blend(b)]);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_flatten_rgb_is_unchanged() {
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let flat = flatten_onto_white(DynamicImage::ImageRgb8(rgb.clone()));
        assert_eq!(flat, rgb);
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let flat = flatten_onto_white(DynamicImage::ImageRgba8(rgba));
        assert!(flat.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([12, 34, 56, 255]));
        let flat = flatten_onto_white(DynamicImage::ImageRgba8(rgba));
        assert!(flat.pixels().all(|p| p.0 == [12, 34, 56]));
    }

    #[test]
    fn test_flatten_half_alpha_blends() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = flatten_onto_white(DynamicImage::ImageRgba8(rgba));
        // 255 * 127 / 255 = 127
        assert_eq!(flat.get_pixel(0, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_flatten_gray_alpha() {
        let la = GrayAlphaImage::from_pixel(1, 1, LumaA([0, 0]));
        let flat = flatten_onto_white(DynamicImage::ImageLumaA8(la));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_from_dynamic_records_alpha() {
        let rgba = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]));
        let source = SourceImage::from_dynamic("in.png", DynamicImage::ImageRgba8(rgba));
        assert!(source.flattened_alpha());
        assert_eq!((source.width(), source.height()), (4, 3));
        assert_eq!(source.path(), Path::new("in.png"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let err = SourceImage::load(&missing).unwrap_err();
        assert!(matches!(err, DeepZoomError::InputNotFound(p) if p == missing));
    }

    #[test]
    fn test_load_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = SourceImage::load(&path).unwrap_err();
        assert!(matches!(err, DeepZoomError::Decode { .. }));
    }

    #[test]
    fn test_load_png_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        // Wrong extension on purpose
        let path = dir.path().join("source.bin");
        let rgba = RgbaImage::from_pixel(5, 7, Rgba([200, 100, 50, 255]));
        rgba.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let source = SourceImage::load(&path).unwrap();
        assert_eq!((source.width(), source.height()), (5, 7));
        assert_eq!(source.image().get_pixel(0, 0).0, [200, 100, 50]);
    }
}
