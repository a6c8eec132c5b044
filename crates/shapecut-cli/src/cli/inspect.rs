//! Inspect command - what shape elements does a file contain?
//!
//! Counts `<polygon>` and `<path>` elements and reports path segment counts
//! without running extraction. Handy for figuring out why a file yields
//! fewer shapes than expected.

use clap::Args;
use serde::Serialize;

use shapecut::{ElementKind, SvgDocument};

use super::common::read_svg;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// SVG file to read ('-' for stdin)
    pub input: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct InspectReport {
    pub polygons: usize,
    pub paths: usize,
    /// Paths with no drawable segment (ignored by extraction)
    pub empty_paths: usize,
    pub path_segments: usize,
    /// Elements without an integer `id` (will get a synthesized one)
    pub synthesized_ids: usize,
}

pub fn inspect(doc: &SvgDocument) -> InspectReport {
    let mut report = InspectReport::default();

    for polygon in doc.elements_by_tag(ElementKind::Polygon) {
        report.polygons += 1;
        if polygon.id().and_then(|id| id.trim().parse::<i64>().ok()).is_none() {
            report.synthesized_ids += 1;
        }
    }

    for path in doc.elements_by_tag(ElementKind::Path) {
        report.paths += 1;
        let segments = path.segment_count();
        report.path_segments += segments;
        if segments == 0 {
            report.empty_paths += 1;
        } else if path.id().and_then(|id| id.trim().parse::<i64>().ok()).is_none() {
            report.synthesized_ids += 1;
        }
    }

    report
}

/// Execute the inspect command.
pub fn cmd_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let doc = read_svg(&args.input)?;
    let report = inspect(&doc);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Polygons:        {}", report.polygons);
        println!("Paths:           {}", report.paths);
        println!("  empty:         {}", report.empty_paths);
        println!("  segments:      {}", report.path_segments);
        println!("Synthesized IDs: {}", report.synthesized_ids);
    }
    Ok(())
}
