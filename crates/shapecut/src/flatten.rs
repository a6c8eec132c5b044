//! Curve flattening - turn Bézier segments into a fixed number of points.
//!
//! Unlike adaptive flattening (`for_each_flattened` with a tolerance), this
//! always samples at evenly spaced `t` values. The output is deterministic
//! and the point count is known up front, which is what downstream nesting
//! wants: a piecewise-linear outline, not an analytic curve.
//!
//! lyon_geom does the actual curve evaluation.

use crate::geometry::Point;
use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};

#[inline]
fn to_lyon(p: Point) -> lyon_geom::Point<f64> {
    point(p.x, p.y)
}

/// Sample a cubic Bézier at `t = 1/n, 2/n, ..., 1`.
///
/// The start point is NOT included (it's the pen position, already
/// emitted). The last point is exactly `p3`, so the next segment starts
/// where this one ends.
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, samples: usize) -> Vec<Point> {
    let samples = samples.max(1);
    let curve = CubicBezierSegment {
        from: to_lyon(p0),
        ctrl1: to_lyon(p1),
        ctrl2: to_lyon(p2),
        to: to_lyon(p3),
    };

    sample_evenly(samples, p3, |t| {
        let p = curve.sample(t);
        Point::new(p.x, p.y)
    })
}

/// Sample a quadratic Bézier at `t = 1/n, 2/n, ..., 1`.
///
/// Same contract as [`flatten_cubic`].
pub fn flatten_quadratic(p0: Point, ctrl: Point, p2: Point, samples: usize) -> Vec<Point> {
    let samples = samples.max(1);
    let curve = QuadraticBezierSegment {
        from: to_lyon(p0),
        ctrl: to_lyon(ctrl),
        to: to_lyon(p2),
    };

    sample_evenly(samples, p2, |t| {
        let p = curve.sample(t);
        Point::new(p.x, p.y)
    })
}

fn sample_evenly<F>(samples: usize, end: Point, eval: F) -> Vec<Point>
where
    F: Fn(f64) -> Point,
{
    let mut points: Vec<Point> = (1..samples)
        .map(|i| eval(i as f64 / samples as f64))
        .collect();
    // Pin t = 1 to the endpoint instead of trusting the polynomial.
    points.push(end);
    points
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    /// Textbook formula, to check lyon against.
    fn bezier(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
        let mt = 1.0 - t;
        p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
    }

    #[test]
    fn cubic_five_samples() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(0.0, 10.0);
        let p2 = Point::new(10.0, 10.0);
        let p3 = Point::new(10.0, 0.0);

        let pts = flatten_cubic(p0, p1, p2, p3, 5);
        assert_eq!(pts.len(), 5);
        for (i, p) in pts.iter().enumerate() {
            let t = (i + 1) as f64 / 5.0;
            assert!(close(*p, bezier(p0, p1, p2, p3, t)), "sample {} = {:?}", i, p);
        }
        assert_eq!(pts[4], p3);
    }

    #[test]
    fn cubic_midpoint_of_symmetric_arch() {
        let pts = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            2,
        );
        // B(0.5) = (5, 7.5)
        assert!(close(pts[0], Point::new(5.0, 7.5)));
    }

    #[test]
    fn cubic_last_point_is_endpoint_for_many_inputs() {
        // Sweep a handful of awkward control quads
        let coords = [-1234.5, -0.001, 0.0, 3.3, 987654.321];
        for &a in &coords {
            for &b in &coords {
                let p3 = Point::new(b, a);
                let pts = flatten_cubic(Point::new(a, b), Point::new(b, b), Point::new(a, a), p3, 7);
                let last = *pts.last().unwrap();
                assert!((last.x - p3.x).abs() < 1e-4 && (last.y - p3.y).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn samples_are_in_increasing_t_order() {
        // Straight cubic along x: x grows monotonically with t
        let pts = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            10,
        );
        assert!(pts.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn zero_samples_still_reaches_endpoint() {
        let pts = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 0.0),
            0,
        );
        assert_eq!(pts, vec![Point::new(3.0, 0.0)]);
    }

    #[test]
    fn quadratic_samples() {
        let pts = flatten_quadratic(Point::new(0.0, 0.0), Point::new(5.0, 10.0), Point::new(10.0, 0.0), 4);
        assert_eq!(pts.len(), 4);
        // B(0.5) = 0.25*p0 + 0.5*ctrl + 0.25*p2 = (5, 5)
        assert!(close(pts[1], Point::new(5.0, 5.0)));
        assert_eq!(pts[3], Point::new(10.0, 0.0));
    }
}
