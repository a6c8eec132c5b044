//! Core geometry types for shapecut.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (Copy only for small stack values)
//! - `PartialEq` = compare with `==`
//! - `Serialize` = serde can turn it into JSON for the CLI

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Identifier assigned to a shape during one extraction run.
pub type ShapeId = i64;

/// Axis-aligned bounds of a shape.
///
/// Always derived from the vertices; call [`BoundingBox::from_points`]
/// again after moving them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A shape pulled out of an SVG document.
///
/// ## Rust Lesson #4: Ownership & Vec
///
/// The extractor creates a `Shape` and owns it until it is handed back in a
/// `Vec<Shape>`. Post-processing borrows the list mutably (`&mut [Shape]`),
/// so there is exactly one writer at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    /// Unique within one extraction run
    pub id: ShapeId,
    /// Raw `class` attribute (empty when absent)
    pub class: String,
    /// `true` for `<polygon>`, `false` for `<path>`
    pub is_polygon: bool,
    /// Vertices in emission order
    pub vertices: Vec<Point>,
    /// Filled in by [`crate::postprocess::compute_bounds_and_validate`]
    pub bounding_box: BoundingBox,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite (no NaN / infinity).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ## Rust Lesson #5: Operator Overloading
//
// Implementing `Add` lets us write `a + b` for points, the same way
// `number + number` works. Arithmetic is component-wise.

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl BoundingBox {
    /// Compute the bounding box of a point list.
    ///
    /// Returns `None` for an empty list.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

impl Shape {
    /// Create a shape with no vertices yet.
    pub fn new(id: ShapeId, class: impl Into<String>, is_polygon: bool) -> Self {
        Self {
            id,
            class: class.into(),
            is_polygon,
            vertices: Vec::new(),
            bounding_box: BoundingBox::default(),
        }
    }

    /// Builder-style helper to attach vertices.
    pub fn with_vertices(mut self, vertices: Vec<Point>) -> Self {
        self.vertices = vertices;
        self
    }

    /// "Polygon" or "Path", for reports.
    pub fn kind_name(&self) -> &'static str {
        if self.is_polygon { "Polygon" } else { "Path" }
    }

    /// `true` if no two vertices are closer than `min_distance`.
    ///
    /// Checks every pair, O(n²). Polygons coming out of SVG markup are
    /// small enough that this never matters.
    pub fn has_distinct_vertices(&self, min_distance: f64) -> bool {
        let v = &self.vertices;
        for i in 0..v.len() {
            for j in (i + 1)..v.len() {
                if v[i].distance(v[j]) < min_distance {
                    return false;
                }
            }
        }
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================
