// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Display;

use xmlwriter::XmlWriter;

use crate::names::SVG_NS;
use crate::vector::{VectorDocument, VectorPath};
use crate::Options;

pub(crate) fn convert(doc: &VectorDocument, opt: &Options) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options {
        use_single_quote: false,
        indent: opt.indent,
        attributes_indent: xmlwriter::Indent::None,
    });

    xml.start_element("svg");
    xml.write_attribute("xmlns", SVG_NS);
    xml.write_attribute("width", &doc.width);
    xml.write_attribute("height", &doc.height);
    xml.write_viewbox(&doc.viewport_width, &doc.viewport_height);

    for path in &doc.paths {
        xml.write_path(path, doc);
    }

    xml.end_document()
}

trait XmlWriterExt {
    fn write_viewbox<V: Display + ?Sized>(&mut self, width: &V, height: &V);
    fn write_path(&mut self, path: &VectorPath, doc: &VectorDocument);
}

impl XmlWriterExt for XmlWriter {
    fn write_viewbox<V: Display + ?Sized>(&mut self, width: &V, height: &V) {
        self.write_attribute_fmt("viewBox", format_args!("0 0 {} {}", width, height));
    }

    fn write_path(&mut self, path: &VectorPath, doc: &VectorDocument) {
        self.start_element("path");
        self.write_attribute("d", &path.data);
        self.write_attribute("fill", path.resolved_fill(doc.tint.as_ref()));
        self.write_attribute("stroke", path.resolved_stroke());
        self.write_attribute("stroke-width", path.resolved_stroke_width());
        self.end_element();
    }
}
