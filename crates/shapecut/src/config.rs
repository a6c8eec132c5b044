//! Extraction settings.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```yaml
//! unit_scale: 0.2646
//! max_width: 600
//! curve_samples: 8
//! ```

use serde::{Deserialize, Serialize};

/// How IDs are synthesized for elements whose `id` isn't a free integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Lowest unused non-negative integer. Reproducible.
    #[default]
    Sequential,
    /// Hash of (element id, salt) into `[0, 4000)`, retrying on collision.
    /// Pass a time-based salt to get the legacy non-reproducible behavior.
    Hashed { salt: u64 },
}

/// Settings for extraction and post-processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Polygons with two vertices closer than this are degenerate
    pub min_vertex_distance: f64,
    /// Polygons need at least this many vertices
    pub min_polygon_vertices: usize,
    /// Points emitted per Bézier segment
    pub curve_samples: usize,
    /// Multiplier from SVG user units to output units (96 DPI → mm)
    pub unit_scale: f64,
    /// Width (in output units) above which a shape is reported as oversize
    pub max_width: f64,
    /// Translate everything so the minimum corner sits at the origin
    pub normalize: bool,
    pub id_strategy: IdStrategy,
    /// Decimal places in text output
    pub precision: usize,
}

pub const DEFAULT_UNIT_SCALE: f64 = 0.3528;
pub const DEFAULT_CURVE_SAMPLES: usize = 5;

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_vertex_distance: 0.1,
            min_polygon_vertices: 4,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            unit_scale: DEFAULT_UNIT_SCALE,
            max_width: 1000.0,
            normalize: true,
            id_strategy: IdStrategy::Sequential,
            precision: 5,
        }
    }
}

impl ExtractConfig {
    /// Sample count actually used for flattening (never zero).
    #[inline]
    pub fn effective_curve_samples(&self) -> usize {
        self.curve_samples.max(1)
    }
}
