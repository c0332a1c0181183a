// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vdrender` renders Android Vector Drawables and SVG images into PNG or JPEG.

The SVG is embedded into a `data:` URL, decoded by [usvg], rendered by [resvg]
onto a fresh [tiny-skia] pixmap and then encoded.

```no_run
let xml = std::fs::read_to_string("ic_home.xml").unwrap();
let svg = vdsvg::translate(&xml).unwrap();
let img = vdrender::export(&svg, vdrender::RasterFormat::PNG, &vdrender::Options::default()).unwrap();
img.save("ic_home.png").unwrap();
```

[usvg]: https://github.com/RazrFalcon/resvg/tree/master/crates/usvg
[resvg]: https://github.com/RazrFalcon/resvg
[tiny-skia]: https://github.com/RazrFalcon/tiny-skia
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::upper_case_acronyms)]

use std::sync::Arc;

use base64::Engine;

pub use tiny_skia;
pub use usvg;

mod encode;
mod source;

pub use source::{DecodedImage, ImageSource};

/// A broad error category.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The image source cannot be decoded.
    Render,
    /// A drawing surface cannot be obtained or encoded.
    Encode,
}

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// An image source is not an embedded SVG.
    InvalidSource(String),

    /// An embedded SVG cannot be decoded.
    RenderingFailed(usvg::Error),

    /// A pixmap of the required size cannot be allocated.
    SurfaceUnavailable(u32, u32),

    /// Failed to encode a pixmap.
    EncodingFailed(String),
}

impl Error {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidSource(_) | Error::RenderingFailed(_) => ErrorKind::Render,
            Error::SurfaceUnavailable(..) | Error::EncodingFailed(_) => ErrorKind::Encode,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidSource(ref msg) => {
                write!(f, "failed to load an image source cause {}", msg)
            }
            Error::RenderingFailed(ref e) => {
                write!(f, "failed to load an image source cause {}", e)
            }
            Error::SurfaceUnavailable(w, h) => {
                write!(f, "failed to allocate a {}x{} drawing surface", w, h)
            }
            Error::EncodingFailed(ref msg) => {
                write!(f, "failed to encode an image cause {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::RenderingFailed(ref e) => Some(e),
            _ => None,
        }
    }
}

/// An output raster format.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RasterFormat {
    /// Lossless, with an alpha channel.
    PNG,
    /// Lossy, without an alpha channel.
    JPEG,
}

impl RasterFormat {
    /// Checks that the format is lossy and cannot store transparency.
    pub fn is_lossy(self) -> bool {
        self == RasterFormat::JPEG
    }

    /// Returns the format MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            RasterFormat::PNG => "image/png",
            RasterFormat::JPEG => "image/jpeg",
        }
    }

    /// Returns a preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::PNG => "png",
            RasterFormat::JPEG => "jpg",
        }
    }

    /// Detects a format by a file extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl std::str::FromStr for RasterFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(RasterFormat::PNG),
            "jpg" | "jpeg" => Ok(RasterFormat::JPEG),
            _ => Err("invalid format"),
        }
    }
}

/// Export options.
#[derive(Clone, Debug)]
pub struct Options {
    /// An image size to use when an SVG has neither a size nor a `viewBox`.
    ///
    /// Default: `(300, 300)`
    pub default_size: usvg::Size,

    /// A background color for lossy formats.
    ///
    /// JPEG has no alpha channel, so transparent areas are painted with this color.
    /// Its alpha is ignored.
    ///
    /// Default: `#1e293b`
    pub background: tiny_skia::Color,

    /// JPEG quality. From 1 to 100.
    ///
    /// Default: 90
    pub jpeg_quality: u8,

    /// A fonts database for SVG `text` elements.
    ///
    /// Default: empty
    pub fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            default_size: usvg::Size::from_wh(300.0, 300.0).unwrap(),
            background: tiny_skia::Color::from_rgba8(0x1e, 0x29, 0x3b, 0xff),
            jpeg_quality: 90,
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }
}

impl Options {
    pub(crate) fn to_usvg(&self) -> usvg::Options<'static> {
        let mut opt = usvg::Options::default();
        opt.default_size = self.default_size;
        opt.fontdb = self.fontdb.clone();
        opt
    }
}

/// An encoded raster image.
#[derive(Clone, Debug)]
pub struct RasterImage {
    format: RasterFormat,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Returns the image format.
    pub fn format(&self) -> RasterFormat {
        self.format
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns the encoded data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Saves the image to a file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, &self.data)
    }

    /// Returns the image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        let data = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.format.mime_type(), data)
    }
}

/// Renders an SVG string into a raster image.
///
/// A new drawing surface is allocated on each call,
/// so exports can run concurrently.
pub fn export(svg: &str, format: RasterFormat, opt: &Options) -> Result<RasterImage, Error> {
    export_source(&ImageSource::from_svg(svg), format, opt)
}

/// Renders an embedded SVG into a raster image.
pub fn export_source(
    source: &ImageSource,
    format: RasterFormat,
    opt: &Options,
) -> Result<RasterImage, Error> {
    let image = source.decode(opt)?;
    let pixmap = render(&image, format, opt)?;
    let data = encode::encode(&pixmap, format, opt)?;

    Ok(RasterImage {
        format,
        width: pixmap.width(),
        height: pixmap.height(),
        data,
    })
}

/// Renders a decoded image onto a new pixmap of its natural size.
///
/// The image is drawn unscaled at the origin.
/// For lossy formats the pixmap is filled with [`Options::background`] first.
/// Otherwise it stays transparent.
pub fn render(
    image: &DecodedImage,
    format: RasterFormat,
    opt: &Options,
) -> Result<tiny_skia::Pixmap, Error> {
    let size = image.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or(Error::SurfaceUnavailable(size.width(), size.height()))?;

    if format.is_lossy() {
        let mut background = opt.background;
        background.set_alpha(1.0);
        pixmap.fill(background);
    } else {
        pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    log::debug!(
        "Rendering a {}x{} image for {:?}.",
        size.width(),
        size.height(),
        format
    );

    resvg::render(image.tree(), tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}
