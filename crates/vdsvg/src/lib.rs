// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vdsvg` converts [Android Vector Drawables] into SVG.

Only the subset of the format that matters for a preview is converted:
the document size, the viewport, a global tint and the paths with their
fill, stroke and stroke width. Everything else is ignored.

Color resources (`@color/...`) and theme attributes (`?attr/...`) cannot be
resolved outside of an Android application, so they are replaced with `currentColor`.

SVG input is passed through as is.

## Example

```
let xml = r##"<vector xmlns:android="http://schemas.android.com/apk/res/android"
    android:width="24dp" android:height="24dp">
    <path android:fillColor="#FF0000" android:pathData="M0,0 L24,24"/>
</vector>"##;

let svg = vdsvg::translate(xml).unwrap();
assert!(svg.contains(r#"viewBox="0 0 24 24""#));
```

[Android Vector Drawables]: https://developer.android.com/develop/ui/views/graphics/vector-drawable-resources
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::uninlined_format_args)]

mod assist;
mod color;
mod dialect;
mod names;
mod units;
mod vector;
mod writer;

pub use assist::{
    generate_vector_drawable, strip_code_fence, AssistError, Assistant, BoxedError, ImagePayload,
    Instruction,
};
pub use color::CURRENT_COLOR;
pub use dialect::Dialect;
pub use roxmltree;
pub use xmlwriter::Indent;

/// A broad error category.
///
/// The categories are stable, while `Error` variants may grow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The input is not a well-formed XML.
    Parse,
    /// The input is a recognized dialect, but a required element is missing.
    Schema,
    /// Any other structural problem.
    Conversion,
}

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Failed to parse an XML.
    ///
    /// The position points into the input text.
    /// It differs from the parser's one when namespace declarations were injected.
    ParsingFailed(roxmltree::Error, roxmltree::TextPos),

    /// A Vector Drawable doesn't have a `vector` element.
    MissingVectorElement,

    /// An SVG doesn't have an `svg` root element.
    ///
    /// Reported only in [`Options::strict`] mode.
    MissingSvgElement,

    /// A Vector Drawable cannot be converted.
    ConversionFailed(String),
}

impl Error {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ParsingFailed(..) => ErrorKind::Parse,
            Error::MissingVectorElement | Error::MissingSvgElement => ErrorKind::Schema,
            Error::ConversionFailed(_) => ErrorKind::Conversion,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        let pos = e.pos();
        Error::ParsingFailed(e, pos)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ParsingFailed(ref e, pos) => {
                let msg = e.to_string();
                match msg.strip_suffix(&format!(" at {}", e.pos())) {
                    Some(msg) => write!(f, "XML parsing failed cause {} at {}", msg, pos),
                    None => write!(f, "XML parsing failed cause {}", msg),
                }
            }
            Error::MissingVectorElement => {
                write!(
                    f,
                    "the <vector> element was not found, is this a valid Vector Drawable?"
                )
            }
            Error::MissingSvgElement => {
                write!(f, "the <svg> root element was not found")
            }
            Error::ConversionFailed(ref msg) => {
                write!(f, "failed to convert a Vector Drawable cause {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ParsingFailed(ref e, _) => Some(e),
            _ => None,
        }
    }
}

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// A size that will be used when `android:width` or `android:height` is not set.
    ///
    /// Default: `24`
    pub default_size: String,

    /// Validate SVG input instead of passing it through.
    ///
    /// When enabled, SVG input must be a well-formed XML with an `svg` root element.
    /// It's still returned unchanged.
    ///
    /// Default: false
    pub strict: bool,

    /// Output XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: Indent,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            default_size: "24".to_string(),
            strict: false,
            indent: Indent::Spaces(4),
        }
    }
}

/// Converts a Vector Drawable into SVG using default options.
///
/// See [`translate_with`] for details.
pub fn translate(text: &str) -> Result<String, Error> {
    translate_with(text, &Options::default())
}

/// Converts a Vector Drawable into SVG.
///
/// Input that doesn't start with a `vector` element is returned unchanged.
/// No validation is performed on it, unless [`Options::strict`] is set.
pub fn translate_with(text: &str, opt: &Options) -> Result<String, Error> {
    match Dialect::detect(text) {
        Dialect::VectorDrawable => convert_vector_drawable(text, opt),
        Dialect::Svg => {
            if opt.strict {
                check_svg(text)?;
            }

            Ok(text.to_string())
        }
    }
}

fn convert_vector_drawable(text: &str, opt: &Options) -> Result<String, Error> {
    let (text, positions) = dialect::declare_missing_namespaces(text);
    let xml = roxmltree::Document::parse(&text).map_err(|e| {
        let pos = positions.to_input(e.pos());
        Error::ParsingFailed(e, pos)
    })?;
    let doc = vector::VectorDocument::parse(&xml, &positions, opt)?;
    Ok(writer::convert(&doc, opt))
}

fn check_svg(text: &str) -> Result<(), Error> {
    let xml_opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
    if xml.root_element().tag_name().name() != "svg" {
        return Err(Error::MissingSvgElement);
    }

    Ok(())
}
