//! Text output - one record per shape, meant for diffing and debugging.
//!
//! ```text
//! Shape ID: 12, Class: cut outer, IsPolygon: true
//! 0.00000,0.00000;28.22400,0.00000;28.22400,28.22400
//!
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::OutputWriteError;
use crate::geometry::Shape;

/// Header line for a shape.
pub fn format_header(shape: &Shape) -> String {
    format!(
        "Shape ID: {}, Class: {}, IsPolygon: {}",
        shape.id, shape.class, shape.is_polygon
    )
}

/// `x,y;x,y;...` with `precision` decimals.
pub fn format_vertices(shape: &Shape, precision: usize) -> String {
    shape
        .vertices
        .iter()
        .map(|p| format!("{:.*},{:.*}", precision, p.x, precision, p.y))
        .collect::<Vec<_>>()
        .join(";")
}

/// Full record for one shape, including the trailing blank line.
pub fn format_shape(shape: &Shape, precision: usize) -> String {
    format!("{}\n{}\n\n", format_header(shape), format_vertices(shape, precision))
}

/// Write all shapes to any writer.
pub fn write_text<W: Write>(writer: &mut W, shapes: &[Shape], precision: usize) -> std::io::Result<()> {
    for shape in shapes {
        writer.write_all(format_shape(shape, precision).as_bytes())?;
    }
    writer.flush()
}

/// Write all shapes to a file, replacing it.
pub fn save_text(path: impl AsRef<Path>, shapes: &[Shape], precision: usize) -> Result<(), OutputWriteError> {
    let path = path.as_ref();
    let io_err = |source| OutputWriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_text(&mut writer, shapes, precision).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn square() -> Shape {
        Shape::new(12, "cut outer", true).with_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(28.224, 0.0),
            Point::new(28.224, 1.0 / 3.0),
        ])
    }

    #[test]
    fn record_layout() {
        assert_eq!(
            format_shape(&square(), 5),
            "Shape ID: 12, Class: cut outer, IsPolygon: true\n\
             0.00000,0.00000;28.22400,0.00000;28.22400,0.33333\n\n"
        );
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(format_vertices(&square(), 1), "0.0,0.0;28.2,0.0;28.2,0.3");
    }

    #[test]
    fn empty_class_and_path_kind() {
        let shape = Shape::new(3, "", false).with_vertices(vec![Point::new(-1.5, 2.0)]);
        assert_eq!(format_header(&shape), "Shape ID: 3, Class: , IsPolygon: false");
        assert_eq!(format_vertices(&shape, 2), "-1.50,2.00");
    }

    #[test]
    fn write_text_concatenates_records() {
        let shapes = vec![square(), Shape::new(4, "", false)];
        let mut buf = Vec::new();
        write_text(&mut buf, &shapes, 5).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("Shape ID:").count(), 2);
        assert!(text.ends_with("Shape ID: 4, Class: , IsPolygon: false\n\n\n"));
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let result = save_text("/definitely/not/here/out.txt", &[square()], 5);
        assert!(matches!(result, Err(OutputWriteError::Io { .. })));
    }
}
