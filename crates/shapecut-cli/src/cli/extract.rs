//! Extract command implementation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use shapecut::{
    BoundingBox, ExtractConfig, IdStrategy, OversizeWarning, Point, Processed, Rejection, Shape,
    process,
};

use super::common::{OutputFormat, load_config, read_svg, write_string_output, write_text_output};

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// SVG file to read ('-' for stdin)
    pub input: String,

    /// Output file ('-' for stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// YAML or JSON file with extraction settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Multiplier from SVG user units to output units
    #[arg(long)]
    pub unit_scale: Option<f64>,

    /// Width above which shapes are reported as oversize
    #[arg(long)]
    pub max_width: Option<f64>,

    /// Points per curve segment
    #[arg(short, long)]
    pub samples: Option<usize>,

    /// Minimum distance between polygon vertices
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Decimal places in text output
    #[arg(long)]
    pub precision: Option<usize>,

    /// Keep coordinates where they are instead of moving them to the origin
    #[arg(long)]
    pub no_normalize: bool,

    /// Synthesize IDs by time-salted hashing (not reproducible)
    #[arg(long)]
    pub legacy_ids: bool,

    /// Print a per-shape summary on stderr
    #[arg(long)]
    pub summary: bool,
}

impl ExtractArgs {
    /// Defaults, then the config file, then individual flags.
    pub fn resolve_config(&self) -> anyhow::Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ExtractConfig::default(),
        };

        if let Some(v) = self.unit_scale {
            config.unit_scale = v;
        }
        if let Some(v) = self.max_width {
            config.max_width = v;
        }
        if let Some(v) = self.samples {
            config.curve_samples = v;
        }
        if let Some(v) = self.min_distance {
            config.min_vertex_distance = v;
        }
        if let Some(v) = self.precision {
            config.precision = v;
        }
        if self.no_normalize {
            config.normalize = false;
        }
        if self.legacy_ids {
            let salt = chrono::Utc::now().timestamp_micros() as u64;
            config.id_strategy = IdStrategy::Hashed { salt };
        }
        Ok(config)
    }
}

/// A shape in JSON output format.
#[derive(Serialize)]
struct JsonShape<'a> {
    id: i64,
    class: &'a str,
    is_polygon: bool,
    bounding_box: BoundingBox,
    vertices: &'a [Point],
}

/// JSON output with shapes and diagnostics.
#[derive(Serialize)]
struct JsonOutput<'a> {
    shapes: Vec<JsonShape<'a>>,
    rejected: &'a [Rejection],
    oversize: &'a [OversizeWarning],
}

fn to_json(processed: &Processed) -> serde_json::Result<String> {
    let shapes = processed
        .shapes
        .iter()
        .map(|s: &Shape| JsonShape {
            id: s.id,
            class: &s.class,
            is_polygon: s.is_polygon,
            bounding_box: s.bounding_box,
            vertices: &s.vertices,
        })
        .collect();

    serde_json::to_string_pretty(&JsonOutput {
        shapes,
        rejected: &processed.rejected,
        oversize: &processed.oversize,
    })
}

fn print_summary(shapes: &[Shape]) {
    for shape in shapes {
        eprintln!(
            "[RESULT] Shape ID: {}, Type: {}, {} vertices",
            shape.id,
            shape.kind_name(),
            shape.vertices.len()
        );
    }
}

/// Execute the extract command.
pub fn cmd_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let doc = read_svg(&args.input)?;

    let processed = process(&doc, &config);
    info!(
        "extracted {} shapes ({} rejected, {} oversize)",
        processed.shapes.len(),
        processed.rejected.len(),
        processed.oversize.len()
    );

    if args.summary {
        print_summary(&processed.shapes);
    }

    let output = args.output.as_deref();
    match args.format {
        OutputFormat::Text => write_text_output(output, &processed.shapes, config.precision)?,
        OutputFormat::Json => {
            let json = to_json(&processed).context("failed to serialize JSON")?;
            write_string_output(output, &json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecut::process_str;

    fn args(extra: &[&str]) -> ExtractArgs {
        use clap::Parser;

        #[derive(clap::Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ExtractArgs,
        }

        let mut argv = vec!["shapecut", "in.svg"];
        argv.extend_from_slice(extra);
        Wrapper::parse_from(argv).args
    }

    #[test]
    fn flags_override_defaults() {
        let config = args(&["--unit-scale", "1", "--samples", "8", "--no-normalize", "--precision", "2"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.unit_scale, 1.0);
        assert_eq!(config.curve_samples, 8);
        assert_eq!(config.precision, 2);
        assert!(!config.normalize);
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
    }

    #[test]
    fn legacy_ids_switch_to_hashing() {
        let config = args(&["--legacy-ids"]).resolve_config().unwrap();
        assert!(matches!(config.id_strategy, IdStrategy::Hashed { .. }));
    }

    #[test]
    fn json_includes_diagnostics() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <polygon id="3" class="part" points="0,0 10,0 10,10 0,10"/>
            <polygon points="0,0 1,1"/>
        </svg>"#;
        let processed = process_str(svg, &ExtractConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&processed).unwrap()).unwrap();

        assert_eq!(json["shapes"][0]["id"], 3);
        assert_eq!(json["shapes"][0]["class"], "part");
        assert_eq!(json["shapes"][0]["vertices"].as_array().unwrap().len(), 4);
        assert!(json["shapes"][0]["bounding_box"]["width"].as_f64().unwrap() > 3.5);
        assert_eq!(json["rejected"][0]["reason"], "insufficient points (2)");
    }
}
