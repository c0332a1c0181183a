// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Error, Options, RasterFormat};

pub(crate) fn encode(
    pixmap: &tiny_skia::Pixmap,
    format: RasterFormat,
    opt: &Options,
) -> Result<Vec<u8>, Error> {
    match format {
        RasterFormat::PNG => pixmap
            .encode_png()
            .map_err(|e| Error::EncodingFailed(e.to_string())),
        RasterFormat::JPEG => encode_jpeg(pixmap, opt.jpeg_quality),
    }
}

/// Encodes a pixmap as JPEG.
///
/// The pixmap is expected to be opaque. Alpha is simply dropped.
fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: u8) -> Result<Vec<u8>, Error> {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for p in pixmap.pixels() {
        let c = p.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }

    let quality = quality.clamp(1, 100);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::EncodingFailed(e.to_string()))?;

    Ok(buf)
}
