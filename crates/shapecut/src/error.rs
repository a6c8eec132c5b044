//! Error types for shapecut.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` boilerplate from the `#[error(...)]`
//! attributes, and `#[from]` gives us a free `From` impl so `?` converts
//! between error types automatically.
//!
//! Not every problem is an `Err`: a single bad path only drops that shape
//! (see [`crate::extract`]), and an oversize shape is just a
//! [`crate::postprocess::OversizeWarning`].

use std::path::PathBuf;

use crate::geometry::ShapeId;

/// The SVG document could not be loaded. Fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read SVG file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error at position {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("malformed attribute: {message}")]
    Attribute { message: String },

    #[error("not an SVG document (root element is <{root}>)")]
    NotSvg { root: String },
}

/// A path's `d` attribute could not be interpreted.
///
/// Caught per shape by the extractor; never aborts the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathParseError {
    #[error("invalid path data: {message}")]
    Syntax { message: String },

    #[error("non-finite coordinate in path segment {index}")]
    NonFinite { index: usize },
}

/// Writing the serialized shapes failed.
///
/// The in-memory shapes are untouched, so the caller may retry elsewhere.
#[derive(Debug, thiserror::Error)]
pub enum OutputWriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Stream(#[from] std::io::Error),
}

/// Why a shape was left out of the results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    #[error("insufficient points ({count})")]
    TooFewVertices { count: usize },

    #[error("vertices closer than {min_distance}")]
    VerticesTooClose { min_distance: f64 },

    #[error("{0}")]
    PathParse(#[from] PathParseError),
}

/// Crate-level error for callers that want a single type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Output(#[from] OutputWriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Convenience for log lines that name a shape.
pub(crate) fn shape_label(id: ShapeId, is_polygon: bool) -> String {
    format!("{} {}", if is_polygon { "polygon" } else { "path" }, id)
}
