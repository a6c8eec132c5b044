//! Path interpretation - walk SVG path commands and emit polyline vertices.
//!
//! A `<path d="...">` attribute is first tokenized by svgtypes into
//! [`PathCommand`]s, then [`PathInterpreter`] walks them with a pen,
//! appending one vertex per straight segment and a handful of samples per
//! curve (see [`crate::flatten`]).
//!
//! ## What gets approximated
//!
//! - Cubic and quadratic curves: fixed-count sampling.
//! - Smooth variants (`S`, `T`): the implicit control point is the
//!   reflection of the previous segment's control point, as SVG defines it.
//! - Arcs (`A`): endpoint only. A straight chord from the pen to the target.

use crate::error::PathParseError;
use crate::flatten::{flatten_cubic, flatten_quadratic};
use crate::geometry::Point;

/// One drawing command.
///
/// Coordinates are stored as written: when `abs` is false they are offsets
/// from the pen position at the time the command runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { abs: bool, to: Point },
    LineTo { abs: bool, to: Point },
    HorizontalLineTo { abs: bool, x: f64 },
    VerticalLineTo { abs: bool, y: f64 },
    CubicCurve { abs: bool, ctrl1: Point, ctrl2: Point, to: Point },
    CubicSmooth { abs: bool, ctrl2: Point, to: Point },
    QuadraticCurve { abs: bool, ctrl: Point, to: Point },
    QuadraticSmooth { abs: bool, to: Point },
    Arc {
        abs: bool,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl PathCommand {
    fn is_finite(&self) -> bool {
        match *self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::QuadraticSmooth { to, .. } => to.is_finite(),
            PathCommand::HorizontalLineTo { x, .. } => x.is_finite(),
            PathCommand::VerticalLineTo { y, .. } => y.is_finite(),
            PathCommand::CubicCurve { ctrl1, ctrl2, to, .. } => {
                ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite()
            }
            PathCommand::CubicSmooth { ctrl2, to, .. } => ctrl2.is_finite() && to.is_finite(),
            PathCommand::QuadraticCurve { ctrl, to, .. } => ctrl.is_finite() && to.is_finite(),
            PathCommand::Arc { rx, ry, x_axis_rotation, to, .. } => {
                rx.is_finite() && ry.is_finite() && x_axis_rotation.is_finite() && to.is_finite()
            }
            PathCommand::Close => true,
        }
    }
}

impl From<svgtypes::PathSegment> for PathCommand {
    fn from(segment: svgtypes::PathSegment) -> Self {
        use svgtypes::PathSegment as S;

        match segment {
            S::MoveTo { abs, x, y } => PathCommand::MoveTo { abs, to: Point::new(x, y) },
            S::LineTo { abs, x, y } => PathCommand::LineTo { abs, to: Point::new(x, y) },
            S::HorizontalLineTo { abs, x } => PathCommand::HorizontalLineTo { abs, x },
            S::VerticalLineTo { abs, y } => PathCommand::VerticalLineTo { abs, y },
            S::CurveTo { abs, x1, y1, x2, y2, x, y } => PathCommand::CubicCurve {
                abs,
                ctrl1: Point::new(x1, y1),
                ctrl2: Point::new(x2, y2),
                to: Point::new(x, y),
            },
            S::SmoothCurveTo { abs, x2, y2, x, y } => PathCommand::CubicSmooth {
                abs,
                ctrl2: Point::new(x2, y2),
                to: Point::new(x, y),
            },
            S::Quadratic { abs, x1, y1, x, y } => PathCommand::QuadraticCurve {
                abs,
                ctrl: Point::new(x1, y1),
                to: Point::new(x, y),
            },
            S::SmoothQuadratic { abs, x, y } => PathCommand::QuadraticSmooth { abs, to: Point::new(x, y) },
            S::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => PathCommand::Arc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to: Point::new(x, y),
            },
            S::ClosePath { .. } => PathCommand::Close,
        }
    }
}

/// Tokenize a `d` attribute into commands.
///
/// Any syntax error fails the whole path; a half-parsed outline is worse
/// than none for cutting.
pub fn parse_path_data(data: &str) -> Result<Vec<PathCommand>, PathParseError> {
    let mut commands = Vec::new();

    for (index, segment) in svgtypes::PathParser::from(data).enumerate() {
        let segment = segment.map_err(|e| PathParseError::Syntax { message: e.to_string() })?;
        let command = PathCommand::from(segment);
        if !command.is_finite() {
            return Err(PathParseError::NonFinite { index });
        }
        commands.push(command);
    }

    Ok(commands)
}

/// Control point remembered for the smooth (`S` / `T`) commands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LastControl {
    None,
    Cubic(Point),
    Quadratic(Point),
}

/// Walks path commands with a pen and collects vertices.
///
/// One interpreter per path element. It owns its vertex list and hands it
/// back from [`PathInterpreter::finish`].
#[derive(Debug, Clone)]
pub struct PathInterpreter {
    vertices: Vec<Point>,
    /// Pen position
    current: Point,
    /// Start of the current subpath (where `Z` returns the pen)
    subpath_start: Point,
    last_control: LastControl,
    curve_samples: usize,
}

impl PathInterpreter {
    pub fn new(curve_samples: usize) -> Self {
        Self {
            vertices: Vec::new(),
            current: Point::default(),
            subpath_start: Point::default(),
            last_control: LastControl::None,
            curve_samples: curve_samples.max(1),
        }
    }

    /// Marks the beginning of a path. Nothing to set up yet.
    pub fn start_path(&mut self) {}

    /// Marks the end of a path. Nothing to flush yet.
    pub fn end_path(&mut self) {}

    /// Current pen position.
    pub fn pen(&self) -> Point {
        self.current
    }

    /// Vertices emitted so far.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    fn resolve(&self, abs: bool, p: Point) -> Point {
        if abs { p } else { self.current + p }
    }

    fn emit(&mut self, p: Point) {
        self.current = p;
        self.vertices.push(p);
    }

    /// Apply one command.
    pub fn apply(&mut self, command: PathCommand) {
        // ## Rust Lesson #22: Exhaustive match
        //
        // Adding a variant to PathCommand makes this a compile error until
        // it's handled here. No "unknown command" fallthrough at runtime.
        let next_control = match command {
            PathCommand::MoveTo { abs, to } => {
                let to = self.resolve(abs, to);
                self.subpath_start = to;
                self.emit(to);
                LastControl::None
            }
            PathCommand::LineTo { abs, to } => {
                let to = self.resolve(abs, to);
                self.emit(to);
                LastControl::None
            }
            PathCommand::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.x + x };
                self.emit(Point::new(x, self.current.y));
                LastControl::None
            }
            PathCommand::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.y + y };
                self.emit(Point::new(self.current.x, y));
                LastControl::None
            }
            PathCommand::CubicCurve { abs, ctrl1, ctrl2, to } => {
                let ctrl1 = self.resolve(abs, ctrl1);
                let ctrl2 = self.resolve(abs, ctrl2);
                let to = self.resolve(abs, to);
                self.cubic(ctrl1, ctrl2, to);
                LastControl::Cubic(ctrl2)
            }
            PathCommand::CubicSmooth { abs, ctrl2, to } => {
                let ctrl1 = match self.last_control {
                    LastControl::Cubic(prev) => self.current + (self.current - prev),
                    _ => self.current,
                };
                let ctrl2 = self.resolve(abs, ctrl2);
                let to = self.resolve(abs, to);
                self.cubic(ctrl1, ctrl2, to);
                LastControl::Cubic(ctrl2)
            }
            PathCommand::QuadraticCurve { abs, ctrl, to } => {
                let ctrl = self.resolve(abs, ctrl);
                let to = self.resolve(abs, to);
                self.quadratic(ctrl, to);
                LastControl::Quadratic(ctrl)
            }
            PathCommand::QuadraticSmooth { abs, to } => {
                let ctrl = match self.last_control {
                    LastControl::Quadratic(prev) => self.current + (self.current - prev),
                    _ => self.current,
                };
                let to = self.resolve(abs, to);
                self.quadratic(ctrl, to);
                LastControl::Quadratic(ctrl)
            }
            PathCommand::Arc { abs, to, .. } => {
                // Endpoint only; radii, rotation and flags are ignored.
                let to = self.resolve(abs, to);
                self.emit(to);
                LastControl::None
            }
            PathCommand::Close => {
                self.close();
                LastControl::None
            }
        };
        self.last_control = next_control;
    }

    fn cubic(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let samples = flatten_cubic(self.current, ctrl1, ctrl2, to, self.curve_samples);
        self.vertices.extend(samples);
        self.current = to;
    }

    fn quadratic(&mut self, ctrl: Point, to: Point) {
        let samples = flatten_quadratic(self.current, ctrl, to, self.curve_samples);
        self.vertices.extend(samples);
        self.current = to;
    }

    /// Close the outline by repeating the first vertex.
    ///
    /// No-op on an empty vertex list. The pen returns to the start of the
    /// current subpath.
    pub fn close(&mut self) {
        if let Some(&first) = self.vertices.first() {
            self.vertices.push(first);
        }
        self.current = self.subpath_start;
    }

    /// Take the collected vertices.
    pub fn finish(self) -> Vec<Point> {
        self.vertices
    }
}

/// Run a whole command list through a fresh interpreter.
pub fn interpret(commands: &[PathCommand], curve_samples: usize) -> Vec<Point> {
    let mut interpreter = PathInterpreter::new(curve_samples);
    interpreter.start_path();
    for &command in commands {
        interpreter.apply(command);
    }
    interpreter.end_path();
    interpreter.finish()
}

/// Parse and interpret a `d` attribute in one go.
pub fn path_data_to_points(data: &str, curve_samples: usize) -> Result<Vec<Point>, PathParseError> {
    let commands = parse_path_data(data)?;
    Ok(interpret(&commands, curve_samples))
}

// ============================================================================
// TESTS
// ============================================================================
