// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub(crate) const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";
pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Namespaces a pasted drawable may use without declaring them.
pub(crate) const KNOWN_NAMESPACES: &[(&str, &str)] = &[
    ("android", ANDROID_NS),
    ("app", "http://schemas.android.com/apk/res-auto"),
    ("tools", "http://schemas.android.com/tools"),
    ("aapt", "http://schemas.android.com/aapt"),
];

/// Vector Drawable element names we care about.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum EId {
    Vector,
    Path,
}

impl EId {
    pub fn to_str(self) -> &'static str {
        match self {
            EId::Vector => "vector",
            EId::Path => "path",
        }
    }
}

/// Vector Drawable attribute names, all in the `android` namespace.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum AId {
    Width,
    Height,
    ViewportWidth,
    ViewportHeight,
    Tint,
    PathData,
    FillColor,
    StrokeColor,
    StrokeWidth,
}

impl AId {
    pub fn to_str(self) -> &'static str {
        match self {
            AId::Width => "width",
            AId::Height => "height",
            AId::ViewportWidth => "viewportWidth",
            AId::ViewportHeight => "viewportHeight",
            AId::Tint => "tint",
            AId::PathData => "pathData",
            AId::FillColor => "fillColor",
            AId::StrokeColor => "strokeColor",
            AId::StrokeWidth => "strokeWidth",
        }
    }
}

impl std::fmt::Display for AId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "android:{}", self.to_str())
    }
}

pub(crate) trait NodeExt<'a> {
    fn has_eid(&self, eid: EId) -> bool;

    /// Returns a non-empty `android:*` attribute value.
    fn android_attribute(&self, aid: AId) -> Option<&'a str>;
}

impl<'a, 'input: 'a> NodeExt<'a> for roxmltree::Node<'a, 'input> {
    #[inline]
    fn has_eid(&self, eid: EId) -> bool {
        self.is_element() && self.tag_name().name() == eid.to_str()
    }

    fn android_attribute(&self, aid: AId) -> Option<&'a str> {
        self.attribute((ANDROID_NS, aid.to_str()))
            .filter(|v| !v.is_empty())
    }
}
