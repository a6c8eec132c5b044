//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, bail};
use clap::ValueEnum;
use tracing::info;

use shapecut::{ExtractConfig, OutputWriteError, Shape, SvgDocument, save_text, write_text};

/// Output format for extracted shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load an SVG document from a file, or from stdin when `input` is `-`.
pub fn read_svg(input: &str) -> anyhow::Result<SvgDocument> {
    if input == "-" {
        info!("reading SVG from stdin");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read SVG from stdin")?;
        SvgDocument::parse(&buffer).context("failed to load SVG from stdin")
    } else {
        info!("loading {}", input);
        SvgDocument::load(input).with_context(|| format!("failed to load {}", input))
    }
}

/// Read an `ExtractConfig` from a YAML or JSON file (picked by extension).
pub fn load_config(path: &Path) -> anyhow::Result<ExtractConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let config = match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config JSON {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config YAML {}", path.display()))?,
        other => bail!("unsupported config format '{}' (use .yaml, .yml or .json)", other),
    };
    Ok(config)
}

/// Write shapes as text to a file, or stdout when `output` is `None` or `-`.
pub fn write_text_output(output: Option<&str>, shapes: &[Shape], precision: usize) -> Result<(), OutputWriteError> {
    match output {
        Some(path) if path != "-" => {
            save_text(path, shapes, precision)?;
            info!("shapes saved to {}", path);
            Ok(())
        }
        _ => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_text(&mut lock, shapes, precision)?;
            Ok(())
        }
    }
}

/// Write an already-rendered document to a file or stdout.
pub fn write_string_output(output: Option<&str>, content: &str) -> Result<(), OutputWriteError> {
    match output {
        Some(path) if path != "-" => {
            fs::write(path, content).map_err(|source| OutputWriteError::Io {
                path: path.into(),
                source,
            })?;
            info!("shapes saved to {}", path);
            Ok(())
        }
        _ => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            io::Write::write_all(&mut lock, content.as_bytes())?;
            io::Write::write_all(&mut lock, b"\n")?;
            Ok(())
        }
    }
}
