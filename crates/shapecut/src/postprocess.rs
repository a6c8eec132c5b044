//! Post-processing - unit conversion, normalization and size checks.
//!
//! These run in place over the extracted shapes:
//!
//! 1. [`convert_to_target_units`] - scale user units to millimeters
//! 2. [`normalize`] - shift the drawing so its minimum corner is the origin
//! 3. [`compute_bounds_and_validate`] - fill in bounding boxes, flag shapes
//!    wider than the stock

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::geometry::{BoundingBox, Point, Shape, ShapeId};

/// A shape is wider than the configured limit. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OversizeWarning {
    pub id: ShapeId,
    pub width: f64,
    pub height: f64,
    pub max_width: f64,
}

impl fmt::Display for OversizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} exceeds width limit: {:.2} mm (height: {:.2} mm, limit: {:.2} mm)",
            self.id, self.width, self.height, self.max_width
        )
    }
}

/// Multiply every coordinate by `factor`.
pub fn convert_to_target_units(shapes: &mut [Shape], factor: f64) {
    for vertex in shapes.iter_mut().flat_map(|s| s.vertices.iter_mut()) {
        *vertex = *vertex * factor;
    }
}

/// Minimum x and y over every vertex of every shape.
///
/// `None` when there are no vertices at all.
pub fn global_min(shapes: &[Shape]) -> Option<Point> {
    let mut vertices = shapes.iter().flat_map(|s| s.vertices.iter()).peekable();
    vertices.peek()?;

    Some(vertices.fold(Point::new(f64::INFINITY, f64::INFINITY), |min, p| {
        Point::new(min.x.min(p.x), min.y.min(p.y))
    }))
}

/// Translate all shapes so the overall minimum x and y become zero.
///
/// No-op without vertices. Running it twice changes nothing the second time.
pub fn normalize(shapes: &mut [Shape]) {
    let Some(min) = global_min(shapes) else {
        return;
    };

    for vertex in shapes.iter_mut().flat_map(|s| s.vertices.iter_mut()) {
        *vertex = *vertex - min;
    }
}

/// Store each shape's bounding box and report those wider than `max_width`.
///
/// Shapes without vertices keep their old box. Oversize shapes are kept.
pub fn compute_bounds_and_validate(shapes: &mut [Shape], max_width: f64) -> Vec<OversizeWarning> {
    let mut warnings = Vec::new();

    for shape in shapes.iter_mut() {
        let Some(bbox) = BoundingBox::from_points(&shape.vertices) else {
            continue;
        };
        shape.bounding_box = bbox;

        if bbox.width > max_width {
            let warning = OversizeWarning {
                id: shape.id,
                width: bbox.width,
                height: bbox.height,
                max_width,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
    }

    warnings
}

// ============================================================================
// TESTS
// ============================================================================
