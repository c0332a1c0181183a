// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use base64::Engine;

use crate::{Error, Options};

const SVG_MIME: &str = "image/svg+xml";

/// An SVG image embedded into a `data:` URL.
///
/// The SVG is stored as base64-encoded UTF-8, so any Unicode text survives the trip.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageSource {
    url: String,
}

impl ImageSource {
    /// Embeds an SVG string.
    pub fn from_svg(svg: &str) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
        ImageSource {
            url: format!("data:{};base64,{}", SVG_MIME, data),
        }
    }

    /// Wraps an existing `data:` URL.
    ///
    /// The URL is not validated until [`ImageSource::decode`].
    pub fn from_data_url(url: String) -> Self {
        ImageSource { url }
    }

    /// Returns the `data:` URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Extracts the embedded SVG data.
    pub fn svg_data(&self) -> Result<Vec<u8>, Error> {
        let url = data_url::DataUrl::process(&self.url)
            .map_err(|_| Error::InvalidSource("not a data URL".to_string()))?;

        let mime = url.mime_type();
        if mime.type_ != "image" || mime.subtype != "svg+xml" {
            return Err(Error::InvalidSource("not an SVG image".to_string()));
        }

        let (data, _) = url
            .decode_to_vec()
            .map_err(|_| Error::InvalidSource("malformed base64 data".to_string()))?;

        Ok(data)
    }

    /// Decodes the embedded SVG into a render tree.
    ///
    /// SVG without `width`, `height` and `viewBox` gets [`Options::default_size`].
    pub fn decode(&self, opt: &Options) -> Result<DecodedImage, Error> {
        let data = self.svg_data()?;
        let tree = usvg::Tree::from_data(&data, &opt.to_usvg()).map_err(Error::RenderingFailed)?;

        let mut size = tree.size().to_int_size();
        if is_sizeless(&data) {
            log::warn!(
                "An SVG has no size and no viewBox. Using {}x{}.",
                opt.default_size.width(),
                opt.default_size.height()
            );
            size = opt.default_size.to_int_size();
        }

        Ok(DecodedImage { tree, size })
    }
}

/// A decoded SVG with its natural size.
#[derive(Debug)]
pub struct DecodedImage {
    tree: usvg::Tree,
    size: tiny_skia::IntSize,
}

impl DecodedImage {
    /// Returns the render tree.
    pub fn tree(&self) -> &usvg::Tree {
        &self.tree
    }

    /// Returns the natural image size in pixels.
    pub fn size(&self) -> tiny_skia::IntSize {
        self.size
    }
}

// usvg sizes such images by their content bounding box.
fn is_sizeless(data: &[u8]) -> bool {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(_) => return false,
    };

    let xml_opt = usvg::roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    match usvg::roxmltree::Document::parse_with_options(text, xml_opt) {
        Ok(doc) => {
            let root = doc.root_element();
            !["width", "height", "viewBox"]
                .iter()
                .any(|name| root.has_attribute(*name))
        }
        Err(_) => false,
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
