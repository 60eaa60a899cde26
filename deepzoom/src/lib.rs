//! DeepZoom - Deep Zoom pyramid generation
//!
//! Converts a single large raster image into a Deep Zoom tile set: a `.dzi`
//! XML descriptor plus per-level directories of overlapping JPEG tiles that
//! Deep Zoom viewers (OpenSeadragon and friends) load on demand.
//!
//! # Modules
//!
//! - [`pyramid`] - level count, level sizes and tile rectangles
//! - [`source`] - decoding and alpha flattening
//! - [`resize`] - resampling backends
//! - [`encode`] - tile encoders
//! - [`descriptor`] - the `.dzi` document
//! - [`layout`] - output paths
//! - [`generator`] - the step-by-step pipeline
//! - [`save`] - the one-call pipeline
//! - [`config`] - tiling options and config file
//! - [`logging`] - `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use deepzoom::{DeepZoomGenerator, NoProgress, TilingOptions};
//!
//! let options = TilingOptions::default().with_quality(85);
//! DeepZoomGenerator::new(options).generate(
//!     Path::new("poster.png"),
//!     Path::new("site/poster"),
//!     &mut NoProgress,
//! )?;
//! # Ok::<(), deepzoom::DeepZoomError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod encode;
pub mod error;
pub mod generator;
pub mod layout;
pub mod logging;
pub mod pyramid;
pub mod resize;
pub mod save;
pub mod source;

pub use config::{ConfigFile, TilingOptions};
pub use descriptor::DziDescriptor;
pub use error::{DeepZoomError, DeepZoomResult};
pub use generator::{DeepZoomGenerator, GenerationSummary, NoProgress, ProgressObserver};
pub use layout::OutputLayout;
pub use pyramid::{LevelPlan, PyramidPlan, TileRect};
pub use save::{dzsave, SaveOptions, TileSuffix};
pub use source::SourceImage;

/// Crate version, for banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
