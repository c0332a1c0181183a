// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A color token that makes an element inherit the current color.
pub const CURRENT_COLOR: &str = "currentColor";

/// A color attribute value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum ColorRef {
    /// The `none` sentinel.
    None,
    /// A color literal, like `#ff0000` or `red`. Passed as is.
    Literal(String),
    /// An Android resource or theme reference, like `@color/accent` or `?attr/colorPrimary`.
    ///
    /// We cannot resolve it, so it will be replaced with `currentColor`.
    Reference(String),
}

impl ColorRef {
    /// Parses a color attribute value.
    ///
    /// Returns `None` for an empty string.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let color = if is_resource_reference(text) {
            ColorRef::Reference(text.to_string())
        } else if text == "none" {
            ColorRef::None
        } else {
            ColorRef::Literal(text.to_string())
        };

        Some(color)
    }

    /// Returns an SVG paint string.
    pub fn to_svg_str(&self) -> &str {
        match self {
            ColorRef::None => "none",
            ColorRef::Literal(ref s) => s,
            ColorRef::Reference(ref s) => {
                log::warn!("'{}' cannot be resolved. Using {}.", s, CURRENT_COLOR);
                CURRENT_COLOR
            }
        }
    }
}

/// Checks that a value is an Android resource (`@`) or theme attribute (`?`) reference.
pub(crate) fn is_resource_reference(text: &str) -> bool {
    text.starts_with('@') || text.starts_with('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal() {
        assert_eq!(
            ColorRef::parse("#FF0000"),
            Some(ColorRef::Literal("#FF0000".to_string()))
        );
        assert_eq!(ColorRef::parse("#FF0000").unwrap().to_svg_str(), "#FF0000");
    }

    #[test]
    fn parse_none() {
        assert_eq!(ColorRef::parse("none"), Some(ColorRef::None));
        assert_eq!(ColorRef::None.to_svg_str(), "none");
    }

    #[test]
    fn parse_empty() {
        assert_eq!(ColorRef::parse(""), None);
    }

    #[test]
    fn references_become_current_color() {
        for s in ["@color/accent", "?attr/colorControlNormal", "@android:color/white", "?colorPrimary"] {
            let c = ColorRef::parse(s).unwrap();
            assert!(matches!(c, ColorRef::Reference(_)));
            assert_eq!(c.to_svg_str(), CURRENT_COLOR);
        }
    }
}
