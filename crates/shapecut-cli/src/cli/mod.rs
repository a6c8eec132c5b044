//! CLI command implementations.
//!
//! - `extract` - Extract shapes from an SVG as text or JSON
//! - `inspect` - Count shape elements without extracting

pub mod common;
pub mod extract;
pub mod inspect;

pub use extract::{ExtractArgs, cmd_extract};
pub use inspect::{InspectArgs, cmd_inspect};
