//! SVG access - load a document and expose its `<polygon>` and `<path>`
//! elements.
//!
//! usvg would resolve CSS and transforms, but it throws away `class` and
//! turns polygons into paths. We need both untouched, so this is a small
//! quick-xml pass that records each shape element with its raw attributes.
//! Coordinate lists and path data are tokenized lazily by svgtypes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::LoadError;
use crate::geometry::Point;

/// The element types shapes are extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Polygon,
    Path,
}

impl ElementKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Polygon => "polygon",
            ElementKind::Path => "path",
        }
    }

    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"polygon" => Some(ElementKind::Polygon),
            b"path" => Some(ElementKind::Path),
            _ => None,
        }
    }
}

/// A `<polygon>` or `<path>` element with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    kind: ElementKind,
    attributes: HashMap<String, String>,
}

/// A loaded SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    /// Shape elements in document order
    elements: Vec<SvgElement>,
}

impl SvgElement {
    pub fn new(kind: ElementKind, attributes: HashMap<String, String>) -> Self {
        Self { kind, attributes }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Raw attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn class(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// Parsed `points` list of a polygon.
    ///
    /// svgtypes stops at the first malformed pair; everything before it is
    /// kept. Non-polygons and missing attributes give an empty list.
    pub fn points(&self) -> Vec<Point> {
        match (self.kind, self.attribute("points")) {
            (ElementKind::Polygon, Some(points)) => svgtypes::PointsParser::from(points)
                .map(|(x, y)| Point::new(x, y))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points().len()
    }

    pub fn point_at(&self, index: usize) -> Option<Point> {
        self.points().get(index).copied()
    }

    /// The `d` attribute of a path.
    pub fn path_data(&self) -> Option<&str> {
        match self.kind {
            ElementKind::Path => self.attribute("d"),
            ElementKind::Polygon => None,
        }
    }

    /// Number of well-formed segments at the start of the path data.
    pub fn segment_count(&self) -> usize {
        self.path_data()
            .map(|d| svgtypes::PathParser::from(d).take_while(Result::is_ok).count())
            .unwrap_or(0)
    }
}

impl SvgDocument {
    /// Read and parse an SVG file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse(&content)?;
        debug!(path = %path.display(), elements = doc.elements.len(), "SVG loaded");
        Ok(doc)
    }

    /// Parse SVG markup held in memory.
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut elements = Vec::new();
        let mut seen_root = false;

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| LoadError::Xml {
                position: reader.error_position(),
                message: e.to_string(),
            })?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if !seen_root {
                        let root = e.local_name();
                        if root.as_ref() != b"svg" {
                            return Err(LoadError::NotSvg {
                                root: String::from_utf8_lossy(root.as_ref()).into_owned(),
                            });
                        }
                        seen_root = true;
                    }

                    if let Some(kind) = ElementKind::from_tag(e.local_name().as_ref()) {
                        elements.push(SvgElement::new(kind, read_attributes(e)?));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(LoadError::NotSvg { root: String::new() });
        }

        Ok(Self { elements })
    }

    /// All elements of one kind, in document order.
    pub fn elements_by_tag(&self, kind: ElementKind) -> impl Iterator<Item = &SvgElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Number of polygon + path elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn read_attributes(e: &BytesStart) -> Result<HashMap<String, String>, LoadError> {
    let mut attributes = HashMap::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|e| LoadError::Attribute { message: e.to_string() })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| LoadError::Attribute { message: e.to_string() })?;
        attributes.insert(key, value.into_owned());
    }

    Ok(attributes)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            <g>
                <polygon id="12" class="cut outer" points="10,10 90,10 90,90 10,90"/>
                <path id="p1" d="M0,0 L10,0 L10,10 Z"/>
                <rect x="1" y="1" width="5" height="5"/>
            </g>
            <polygon points="1 2 3 4"></polygon>
        </svg>
    "#;

    #[test]
    fn finds_polygons_and_paths_in_order() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.len(), 3);

        let polygons: Vec<_> = doc.elements_by_tag(ElementKind::Polygon).collect();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].id(), Some("12"));
        assert_eq!(polygons[0].class(), Some("cut outer"));
        assert_eq!(polygons[1].id(), None);

        let paths: Vec<_> = doc.elements_by_tag(ElementKind::Path).collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].path_data(), Some("M0,0 L10,0 L10,10 Z"));
    }

    #[test]
    fn polygon_points() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let poly = doc.elements_by_tag(ElementKind::Polygon).next().unwrap();
        assert_eq!(poly.point_count(), 4);
        assert_eq!(poly.point_at(2), Some(Point::new(90.0, 90.0)));
        assert_eq!(poly.point_at(4), None);
        // Paths have no points list
        let path = doc.elements_by_tag(ElementKind::Path).next().unwrap();
        assert_eq!(path.point_count(), 0);
    }

    #[test]
    fn segment_count_stops_at_first_error() {
        let mut attrs = HashMap::new();
        attrs.insert("d".to_string(), "M0,0 L10,0 X".to_string());
        let path = SvgElement::new(ElementKind::Path, attrs);
        assert_eq!(path.segment_count(), 2);

        let empty = SvgElement::new(ElementKind::Path, HashMap::new());
        assert_eq!(empty.segment_count(), 0);
    }

    #[test]
    fn escaped_attributes_are_unescaped() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path class="a&amp;b" d="M0,0 L1,1"/></svg>"#;
        let doc = SvgDocument::parse(svg).unwrap();
        let path = doc.elements_by_tag(ElementKind::Path).next().unwrap();
        assert_eq!(path.class(), Some("a&b"));
    }

    #[test]
    fn namespaced_tags_are_recognized() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:path d="M0,0 L1,1"/></svg:svg>"#;
        let doc = SvgDocument::parse(svg).unwrap();
        assert_eq!(doc.elements_by_tag(ElementKind::Path).count(), 1);
    }

    #[test]
    fn non_svg_root_is_rejected() {
        let result = SvgDocument::parse("<html><body/></html>");
        assert!(matches!(result, Err(LoadError::NotSvg { root }) if root == "html"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(SvgDocument::parse(""), Err(LoadError::NotSvg { .. })));
    }

    #[test]
    fn broken_xml_is_rejected() {
        let result = SvgDocument::parse("<svg><path d=\"M0,0\"></svg>");
        assert!(matches!(result, Err(LoadError::Xml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SvgDocument::load("/definitely/not/here.svg");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
