//! Shape extraction - turn `<polygon>` and `<path>` elements into [`Shape`]s.
//!
//! Polygons are copied straight from their `points` list. Paths go through
//! the [`PathInterpreter`](crate::path::PathInterpreter). Degenerate shapes
//! are dropped and recorded as [`Rejection`]s, and the survivors are
//! deduplicated.
//!
//! A bad path only costs that one shape: its vertices are discarded, it
//! fails the point-count check, and extraction moves on.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ExtractConfig;
use crate::error::{RejectReason, shape_label};
use crate::geometry::{Point, Shape, ShapeId};
use crate::ids::IdAllocator;
use crate::path::path_data_to_points;
use crate::svg::{ElementKind, SvgDocument, SvgElement};

/// A shape that was left out, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub id: ShapeId,
    pub is_polygon: bool,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RejectReason,
}

fn serialize_reason<S: serde::Serializer>(reason: &RejectReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub shapes: Vec<Shape>,
    pub rejected: Vec<Rejection>,
}

/// Extract all shapes from a document.
///
/// IDs are unique within this call; a fresh [`IdAllocator`] is used every
/// time.
pub fn extract_shapes(doc: &SvgDocument, config: &ExtractConfig) -> Extraction {
    let mut ids = IdAllocator::new(config.id_strategy);
    let mut extraction = Extraction::default();

    for element in doc.elements_by_tag(ElementKind::Polygon) {
        let shape = polygon_shape(element, &mut ids);
        match validate_polygon(&shape, config) {
            Ok(()) => {
                info!(id = shape.id, vertices = shape.vertices.len(), "polygon parsed");
                extraction.shapes.push(shape);
            }
            Err(reason) => reject(&mut extraction, &shape, reason),
        }
    }

    for element in doc.elements_by_tag(ElementKind::Path) {
        // Elements without a single drawable segment aren't shapes at all.
        if element.segment_count() == 0 {
            continue;
        }

        let (shape, parse_error) = path_shape(element, &mut ids, config.effective_curve_samples());
        if shape.vertices.len() > 1 {
            info!(id = shape.id, vertices = shape.vertices.len(), "path parsed");
            extraction.shapes.push(shape);
        } else {
            let reason = parse_error
                .map(RejectReason::from)
                .unwrap_or(RejectReason::TooFewVertices { count: shape.vertices.len() });
            reject(&mut extraction, &shape, reason);
        }
    }

    extraction.shapes = deduplicate(extraction.shapes);
    extraction
}

fn reject(extraction: &mut Extraction, shape: &Shape, reason: RejectReason) {
    warn!(
        "skipping {} with {} vertices: {}",
        shape_label(shape.id, shape.is_polygon),
        shape.vertices.len(),
        reason
    );
    extraction.rejected.push(Rejection {
        id: shape.id,
        is_polygon: shape.is_polygon,
        reason,
    });
}

fn new_shape(element: &SvgElement, ids: &mut IdAllocator, is_polygon: bool) -> Shape {
    let id = ids.allocate(element.id());
    Shape::new(id, element.class().unwrap_or_default(), is_polygon)
}

fn polygon_shape(element: &SvgElement, ids: &mut IdAllocator) -> Shape {
    new_shape(element, ids, true).with_vertices(element.points())
}

/// Build a path shape. On a parse failure the shape comes back with no
/// vertices, along with the error.
fn path_shape(
    element: &SvgElement,
    ids: &mut IdAllocator,
    curve_samples: usize,
) -> (Shape, Option<crate::error::PathParseError>) {
    let shape = new_shape(element, ids, false);
    let data = element.path_data().unwrap_or_default();

    match path_data_to_points(data, curve_samples) {
        Ok(points) => (shape.with_vertices(points), None),
        Err(e) => {
            warn!("error parsing {}: {}", shape_label(shape.id, false), e);
            (shape, Some(e))
        }
    }
}

/// Polygons need enough vertices, all well apart.
pub fn validate_polygon(shape: &Shape, config: &ExtractConfig) -> Result<(), RejectReason> {
    let count = shape.vertices.len();
    if count < config.min_polygon_vertices {
        return Err(RejectReason::TooFewVertices { count });
    }
    if !shape.has_distinct_vertices(config.min_vertex_distance) {
        return Err(RejectReason::VerticesTooClose {
            min_distance: config.min_vertex_distance,
        });
    }
    Ok(())
}

/// Key used to spot duplicate shapes.
fn dedup_key(shape: &Shape) -> (ShapeId, String, bool, String) {
    let vertices = shape
        .vertices
        .iter()
        .map(|p: &Point| format!("<{}, {}>", p.x, p.y))
        .collect::<Vec<_>>()
        .join(",");
    (shape.id, shape.class.clone(), shape.is_polygon, vertices)
}

/// Keep the first of each group of identical shapes, preserving order.
pub fn deduplicate(shapes: Vec<Shape>) -> Vec<Shape> {
    let mut seen = HashSet::new();
    shapes
        .into_iter()
        .filter(|shape| seen.insert(dedup_key(shape)))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn svg(body: &str) -> SvgDocument {
        SvgDocument::parse(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">{}</svg>"#,
            body
        ))
        .unwrap()
    }

    fn extract(body: &str) -> Extraction {
        extract_shapes(&svg(body), &ExtractConfig::default())
    }

    #[test]
    fn polygon_with_four_separated_vertices_is_kept() {
        let ex = extract(r#"<polygon id="5" class="part" points="0,0 10,0 10,10 0,10"/>"#);
        assert_eq!(ex.shapes.len(), 1);
        let shape = &ex.shapes[0];
        assert_eq!(shape.id, 5);
        assert_eq!(shape.class, "part");
        assert!(shape.is_polygon);
        assert_eq!(shape.vertices.len(), 4);
        assert!(ex.rejected.is_empty());
    }

    #[test]
    fn triangle_polygon_is_dropped() {
        let ex = extract(r#"<polygon points="0,0 10,0 10,10"/>"#);
        assert!(ex.shapes.is_empty());
        assert_eq!(ex.rejected[0].reason, RejectReason::TooFewVertices { count: 3 });
    }

    #[test]
    fn polygon_with_close_vertices_is_dropped() {
        let ex = extract(r#"<polygon points="0,0 0,0.05 10,0 10,10"/>"#);
        assert!(ex.shapes.is_empty());
        assert!(matches!(ex.rejected[0].reason, RejectReason::VerticesTooClose { .. }));
    }

    #[test]
    fn path_is_interpreted() {
        let ex = extract(r#"<path id="abc" d="M0,0 L10,0 L10,10 Z"/>"#);
        assert_eq!(ex.shapes.len(), 1);
        let shape = &ex.shapes[0];
        assert!(!shape.is_polygon);
        assert_eq!(shape.class, "");
        assert_eq!(shape.vertices.len(), 4);
        assert_eq!(shape.vertices[0], shape.vertices[3]);
    }

    #[test]
    fn single_point_path_is_dropped() {
        let ex = extract(r#"<path d="M5,5"/>"#);
        assert!(ex.shapes.is_empty());
        assert_eq!(ex.rejected[0].reason, RejectReason::TooFewVertices { count: 1 });
    }

    #[test]
    fn path_without_segments_is_ignored_entirely() {
        let ex = extract(r#"<path d=""/><path/>"#);
        assert!(ex.shapes.is_empty());
        assert!(ex.rejected.is_empty());
    }

    #[test]
    fn malformed_path_is_dropped_but_others_survive() {
        let ex = extract(
            r#"<path id="1" d="M0,0 L10,0 L10,10 X"/>
               <path id="2" d="M0,0 L5,5"/>"#,
        );
        assert_eq!(ex.shapes.len(), 1);
        assert_eq!(ex.shapes[0].id, 2);
        assert_eq!(ex.rejected.len(), 1);
        assert_eq!(ex.rejected[0].id, 1);
        assert!(matches!(ex.rejected[0].reason, RejectReason::PathParse(_)));
    }

    #[test]
    fn ids_are_unique_across_polygons_and_paths() {
        let ex = extract(
            r#"<polygon id="1" points="0,0 10,0 10,10 0,10"/>
               <polygon id="1" points="20,0 30,0 30,10 20,10"/>
               <polygon id="x" points="40,0 50,0 50,10 40,10"/>
               <path id="1" d="M0,0 L1,1"/>
               <path d="M0,0 L2,2"/>"#,
        );
        assert_eq!(ex.shapes.len(), 5);
        let ids: HashSet<_> = ex.shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn polygons_come_before_paths() {
        let ex = extract(
            r#"<path d="M0,0 L1,1"/>
               <polygon points="0,0 10,0 10,10 0,10"/>"#,
        );
        assert!(ex.shapes[0].is_polygon);
        assert!(!ex.shapes[1].is_polygon);
    }

    #[test]
    fn rejected_shapes_still_consume_ids() {
        let ex = extract(
            r#"<polygon points="0,0 1,1"/>
               <polygon points="0,0 10,0 10,10 0,10"/>"#,
        );
        assert_eq!(ex.rejected[0].id, 0);
        assert_eq!(ex.shapes[0].id, 1);
    }

    #[test]
    fn deduplicate_keeps_first_of_identical_shapes() {
        let a = Shape::new(1, "c", true).with_vertices(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        let b = Shape::new(2, "c", true).with_vertices(vec![Point::new(0.0, 0.0)]);
        let mut a2 = a.clone();
        a2.bounding_box.width = 99.0;

        let out = deduplicate(vec![a.clone(), b.clone(), a2]);
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn deduplicate_distinguishes_class_and_kind() {
        let a = Shape::new(1, "c", true);
        let b = Shape::new(1, "d", true);
        let c = Shape::new(1, "c", false);
        assert_eq!(deduplicate(vec![a, b, c]).len(), 3);
    }

    #[test]
    fn custom_thresholds_apply() {
        let config = ExtractConfig {
            min_polygon_vertices: 3,
            min_vertex_distance: 0.01,
            ..Default::default()
        };
        let ex = extract_shapes(&svg(r#"<polygon points="0,0 0,0.05 10,0"/>"#), &config);
        assert_eq!(ex.shapes.len(), 1);
    }
}
