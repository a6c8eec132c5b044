//! The whole run: extract, convert, normalize, validate.

use tracing::info;

use crate::config::ExtractConfig;
use crate::error::LoadError;
use crate::extract::{Rejection, extract_shapes};
use crate::geometry::Shape;
use crate::postprocess::{OversizeWarning, compute_bounds_and_validate, convert_to_target_units, normalize};
use crate::svg::SvgDocument;

/// Finished shapes plus everything worth reporting about the run.
#[derive(Debug, Clone, Default)]
pub struct Processed {
    pub shapes: Vec<Shape>,
    pub rejected: Vec<Rejection>,
    pub oversize: Vec<OversizeWarning>,
}

/// Run extraction and post-processing over a loaded document.
pub fn process(doc: &SvgDocument, config: &ExtractConfig) -> Processed {
    let extraction = extract_shapes(doc, config);
    let mut shapes = extraction.shapes;

    convert_to_target_units(&mut shapes, config.unit_scale);
    if config.normalize {
        normalize(&mut shapes);
    }
    let oversize = compute_bounds_and_validate(&mut shapes, config.max_width);

    info!(
        shapes = shapes.len(),
        rejected = extraction.rejected.len(),
        oversize = oversize.len(),
        "extraction finished"
    );

    Processed {
        shapes,
        rejected: extraction.rejected,
        oversize,
    }
}

/// Parse SVG markup and process it.
pub fn process_str(content: &str, config: &ExtractConfig) -> Result<Processed, LoadError> {
    let doc = SvgDocument::parse(content)?;
    Ok(process(&doc, config))
}

/// Load an SVG file and process it.
pub fn process_file(path: impl AsRef<std::path::Path>, config: &ExtractConfig) -> Result<Processed, LoadError> {
    let doc = SvgDocument::load(path)?;
    Ok(process(&doc, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const DRAWING: &str = r#"
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 5000 500">
            <polygon id="1" class="plate" points="100,100 200,100 200,200 100,200"/>
            <path id="2" class="arch" d="M150,300 C150,400 250,400 250,300"/>
            <path id="3" d="M0,0 X"/>
            <polygon id="4" points="0,400 4000,400 4000,450 0,450"/>
        </svg>
    "#;

    #[test]
    fn full_pipeline() {
        let out = process_str(DRAWING, &ExtractConfig::default()).unwrap();

        assert_eq!(out.shapes.len(), 3);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].id, 3);

        // Everything starts at the origin after normalization
        let min_x = out.shapes.iter().flat_map(|s| &s.vertices).map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = out.shapes.iter().flat_map(|s| &s.vertices).map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert_eq!(min_x, 0.0);
        assert_eq!(min_y, 0.0);

        // 100 user units wide → 35.28 mm
        let plate = &out.shapes[0];
        assert!((plate.bounding_box.width - 35.28).abs() < 1e-9);

        // 4000 units → 1411.2 mm, over the 1000 mm default
        assert_eq!(out.oversize.len(), 1);
        assert_eq!(out.oversize[0].id, 4);
    }

    #[test]
    fn normalization_can_be_disabled() {
        let config = ExtractConfig { normalize: false, unit_scale: 1.0, ..Default::default() };
        let out = process_str(DRAWING, &config).unwrap();
        assert_eq!(out.shapes[0].vertices[0], Point::new(100.0, 100.0));
    }

    #[test]
    fn load_failure_is_fatal() {
        assert!(process_str("not xml at all <", &ExtractConfig::default()).is_err());
        assert!(process_file("/no/such/file.svg", &ExtractConfig::default()).is_err());
    }
}
