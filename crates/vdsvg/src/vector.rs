// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::color::{is_resource_reference, ColorRef};
use crate::dialect::PositionMap;
use crate::names::{AId, EId, NodeExt};
use crate::units::{resolve_size, resolve_viewport};
use crate::{Error, Options};

/// A Vector Drawable reduced to the parts we can convert.
#[derive(Clone, Debug)]
pub(crate) struct VectorDocument {
    pub width: String,
    pub height: String,
    pub viewport_width: String,
    pub viewport_height: String,
    pub tint: Option<ColorRef>,
    pub paths: Vec<VectorPath>,
}

#[derive(Clone, Debug)]
pub(crate) struct VectorPath {
    pub data: String,
    pub fill: Option<ColorRef>,
    pub stroke: Option<ColorRef>,
    pub stroke_width: Option<String>,
}

impl VectorDocument {
    pub fn parse(
        doc: &roxmltree::Document,
        positions: &PositionMap,
        opt: &Options,
    ) -> Result<Self, Error> {
        let vector = doc
            .descendants()
            .find(|n| n.has_eid(EId::Vector))
            .ok_or(Error::MissingVectorElement)?;

        let width = resolve_size(
            AId::Width,
            vector.android_attribute(AId::Width),
            &opt.default_size,
        )?;
        let height = resolve_size(
            AId::Height,
            vector.android_attribute(AId::Height),
            &opt.default_size,
        )?;
        let viewport_width = resolve_viewport(
            AId::ViewportWidth,
            vector.android_attribute(AId::ViewportWidth),
            &width,
        )?;
        let viewport_height = resolve_viewport(
            AId::ViewportHeight,
            vector.android_attribute(AId::ViewportHeight),
            &height,
        )?;
        let tint = vector.android_attribute(AId::Tint).and_then(ColorRef::parse);

        let mut paths = Vec::new();
        for node in vector.descendants().filter(|n| n.has_eid(EId::Path)) {
            if let Some(path) = VectorPath::parse(node, positions)? {
                paths.push(path);
            }
        }

        Ok(VectorDocument {
            width,
            height,
            viewport_width,
            viewport_height,
            tint,
            paths,
        })
    }
}

impl VectorPath {
    fn parse(node: roxmltree::Node, positions: &PositionMap) -> Result<Option<Self>, Error> {
        let data = match node.android_attribute(AId::PathData) {
            Some(v) => v,
            None => {
                log::warn!(
                    "A path without {} at {}. Skipped.",
                    AId::PathData,
                    position(node, positions)
                );
                return Ok(None);
            }
        };

        if is_resource_reference(data) {
            return Err(Error::ConversionFailed(format!(
                "{} at {} references a resource '{}' instead of containing path data",
                AId::PathData,
                position(node, positions),
                data
            )));
        }

        Ok(Some(VectorPath {
            data: data.to_string(),
            fill: node.android_attribute(AId::FillColor).and_then(ColorRef::parse),
            stroke: node.android_attribute(AId::StrokeColor).and_then(ColorRef::parse),
            stroke_width: node.android_attribute(AId::StrokeWidth).map(str::to_string),
        }))
    }

    /// Returns a resolved fill.
    ///
    /// A tint overrides the path's own fill.
    pub fn resolved_fill<'a>(&'a self, tint: Option<&'a ColorRef>) -> &'a str {
        match tint.or(self.fill.as_ref()) {
            Some(c) => c.to_svg_str(),
            None => "none",
        }
    }

    /// Returns a resolved stroke. Not affected by a tint.
    pub fn resolved_stroke(&self) -> &str {
        match self.stroke {
            Some(ref c) => c.to_svg_str(),
            None => "none",
        }
    }

    pub fn resolved_stroke_width(&self) -> &str {
        self.stroke_width.as_deref().unwrap_or("0")
    }
}

/// Returns a node position in the original input.
fn position(node: roxmltree::Node, positions: &PositionMap) -> roxmltree::TextPos {
    positions.to_input(node.document().text_pos_at(node.range().start))
}
