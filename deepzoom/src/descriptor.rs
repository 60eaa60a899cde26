//! The `.dzi` XML descriptor.
//!
//! The descriptor is the contract a viewer reads to address tiles:
//!
//! ```xml
//! <?xml version='1.0' encoding='utf-8'?>
//! <Image xmlns="http://schemas.microsoft.com/deepzoom/2008" Format="jpg" Overlap="1" TileSize="254">
//!   <Size Width="600" Height="400" />
//! </Image>
//! ```
//!
//! It does not list levels, columns or rows; viewers derive them from the
//! full-resolution size and tile size.

use std::fs;
use std::path::Path;

use crate::error::{DeepZoomError, DeepZoomResult};

/// XML namespace of the Deep Zoom 2008 schema.
pub const DEEPZOOM_NAMESPACE: &str = "http://schemas.microsoft.com/deepzoom/2008";

/// Contents of a `.dzi` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DziDescriptor {
    /// Full-resolution width.
    pub width: u32,
    /// Full-resolution height.
    pub height: u32,
    pub tile_size: u32,
    pub overlap: u32,
    /// Tile file extension, e.g. `jpg`.
    pub format: String,
}

impl DziDescriptor {
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        overlap: u32,
        format: impl Into<String>,
    ) -> Self {
        Self {
            width,
            height,
            tile_size,
            overlap,
            format: format.into(),
        }
    }

    /// Render the descriptor as a UTF-8 XML document with 2-space indentation.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version='1.0' encoding='utf-8'?>\n\
             <Image xmlns=\"{ns}\" Format=\"{format}\" Overlap=\"{overlap}\" TileSize=\"{tile_size}\">\n\
             \x20 <Size Width=\"{width}\" Height=\"{height}\" />\n\
             </Image>\n",
            ns = DEEPZOOM_NAMESPACE,
            format = escape_attribute(&self.format),
            overlap = self.overlap,
            tile_size = self.tile_size,
            width = self.width,
            height = self.height,
        )
    }

    /// Write the descriptor to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> DeepZoomResult<()> {
        fs::write(path, self.to_xml()).map_err(|source| DeepZoomError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a descriptor document.
    ///
    /// Only the `Image` and `Size` elements are inspected; anything else in
    /// the document is ignored.
    pub fn parse(xml: &str) -> DeepZoomResult<Self> {
        let image = element_attributes(xml, "Image")?;
        let size = element_attributes(xml, "Size")?;

        if let Some(ns) = attribute(&image, "xmlns") {
            if ns != DEEPZOOM_NAMESPACE {
                return Err(DeepZoomError::InvalidDescriptor(format!(
                    "unexpected namespace '{}'",
                    ns
                )));
            }
        }

        let format = attribute(&image, "Format")
            .ok_or_else(|| missing("Image", "Format"))?
            .to_string();

        Ok(Self {
            width: numeric(&size, "Size", "Width")?,
            height: numeric(&size, "Size", "Height")?,
            tile_size: numeric(&image, "Image", "TileSize")?,
            overlap: numeric(&image, "Image", "Overlap")?,
            format,
        })
    }

    /// Read and parse the descriptor at `path`.
    pub fn read_from(path: &Path) -> DeepZoomResult<Self> {
        let xml = fs::read_to_string(path).map_err(|e| {
            DeepZoomError::InvalidDescriptor(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&xml)
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn missing(element: &str, attr: &str) -> DeepZoomError {
    DeepZoomError::InvalidDescriptor(format!("<{}> is missing the {} attribute", element, attr))
}

fn attribute<'a>(attrs: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(key, _)| *key == name).map(|(_, v)| *v)
}

fn numeric(attrs: &[(&str, &str)], element: &str, name: &str) -> DeepZoomResult<u32> {
    let raw = attribute(attrs, name).ok_or_else(|| missing(element, name))?;
    raw.parse().map_err(|_| {
        DeepZoomError::InvalidDescriptor(format!(
            "<{}> attribute {} is not a number: '{}'",
            element, name, raw
        ))
    })
}

/// Attributes of the first `<name ...>` start tag in `xml`.
fn element_attributes<'a>(xml: &'a str, name: &str) -> DeepZoomResult<Vec<(&'a str, &'a str)>> {
    let open = format!("<{}", name);
    let mut search_from = 0;

    let body = loop {
        let Some(found) = xml[search_from..].find(&open) else {
            return Err(DeepZoomError::InvalidDescriptor(format!(
                "no <{}> element",
                name
            )));
        };
        let after = search_from + found + open.len();
        let rest = &xml[after..];
        // Reject longer names sharing the prefix, e.g. <ImageX>
        if rest.starts_with(|c: char| c.is_whitespace() || c == '/' || c == '>') {
            let end = rest.find('>').ok_or_else(|| {
                DeepZoomError::InvalidDescriptor(format!("unterminated <{}> tag", name))
            })?;
            break rest[..end].trim_end_matches('/');
        }
        search_from = after;
    };

    let mut attrs = Vec::new();
    let mut rest = body.trim_start();
    while !rest.is_empty() {
        let eq = rest.find('=').ok_or_else(|| {
            DeepZoomError::InvalidDescriptor(format!("malformed attribute in <{}>", name))
        })?;
        let key = rest[..eq].trim();
        let value_part = rest[eq + 1..].trim_start();
        let quote = value_part
            .chars()
            .next()
            .filter(|c| *c == '"' || *c == '\'')
            .ok_or_else(|| {
                DeepZoomError::InvalidDescriptor(format!("unquoted attribute {} in <{}>", key, name))
            })?;
        let close = value_part[1..].find(quote).ok_or_else(|| {
            DeepZoomError::InvalidDescriptor(format!("unterminated attribute {} in <{}>", key, name))
        })?;
        attrs.push((key, &value_part[1..1 + close]));
        rest = value_part[close + 2..].trim_start();
    }
    Ok(attrs)
}
