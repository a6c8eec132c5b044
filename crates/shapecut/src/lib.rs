//! # shapecut
//!
//! Pull polygon and path outlines out of SVG files as flat point lists,
//! ready for nesting and CNC cutting layout.
//!
//! ```no_run
//! use shapecut::{ExtractConfig, process_file};
//!
//! let out = process_file("parts.svg", &ExtractConfig::default())?;
//! for shape in &out.shapes {
//!     println!("{} has {} vertices", shape.id, shape.vertices.len());
//! }
//! # Ok::<(), shapecut::LoadError>(())
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod config;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod geometry;
pub mod ids;
pub mod output;
pub mod path;
pub mod pipeline;
pub mod postprocess;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use config::{ExtractConfig, IdStrategy};
pub use error::{Error, LoadError, OutputWriteError, PathParseError, RejectReason, Result};
pub use extract::{Extraction, Rejection, extract_shapes};
pub use flatten::{flatten_cubic, flatten_quadratic};
pub use geometry::{BoundingBox, Point, Shape, ShapeId};
pub use output::{format_shape, save_text, write_text};
pub use path::{PathCommand, PathInterpreter, interpret, parse_path_data, path_data_to_points};
pub use pipeline::{Processed, process, process_file, process_str};
pub use postprocess::{OversizeWarning, compute_bounds_and_validate, convert_to_target_units, normalize};
pub use svg::{ElementKind, SvgDocument, SvgElement};
