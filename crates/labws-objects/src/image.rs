use serde::{Deserialize, Serialize};

use crate::error::{ObjectError, ObjectResult};
use crate::metadata::Metadata;

/// A 2-D image: row-major `f64` buffer plus optional coordinate transform.
///
/// `x0`/`y0` give the physical origin of the first pixel, `dx`/`dy` the
/// pixel pitch. All four are optional; an image without them is purely
/// pixel-indexed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    pub title: String,
    pub data: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
    pub x0: Option<f64>,
    pub y0: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub zlabel: Option<String>,
    pub xunit: Option<String>,
    pub yunit: Option<String>,
    pub zunit: Option<String>,
    pub metadata: Metadata,
}

impl ImageObject {
    /// Create an image from a row-major buffer and its dimensions.
    pub fn new(
        title: impl Into<String>,
        data: Vec<f64>,
        rows: usize,
        cols: usize,
    ) -> ObjectResult<Self> {
        // Overflowed dimensions can never describe a real buffer.
        match rows.checked_mul(cols) {
            Some(expected) if expected == data.len() => {}
            _ => {
                return Err(ObjectError::ShapeMismatch {
                    rows,
                    cols,
                    expected: rows.saturating_mul(cols),
                    actual: data.len(),
                });
            }
        }
        Ok(Self {
            title: title.into(),
            data,
            rows,
            cols,
            x0: None,
            y0: None,
            dx: None,
            dy: None,
            xlabel: None,
            ylabel: None,
            zlabel: None,
            xunit: None,
            yunit: None,
            zunit: None,
            metadata: Metadata::new(),
        })
    }

    /// Set the physical origin and pixel pitch.
    pub fn set_transform(
        &mut self,
        x0: Option<f64>,
        y0: Option<f64>,
        dx: Option<f64>,
        dy: Option<f64>,
    ) {
        self.x0 = x0;
        self.y0 = y0;
        self.dx = dx;
        self.dy = dy;
    }

    /// Pixel value at (row, col), if in bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Image shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_construction() {
        let img = ImageObject::new("frame", vec![0.0; 6], 2, 3).unwrap();
        assert_eq!(img.shape(), (2, 3));
        assert_eq!(img.pixel(1, 2), Some(0.0));
        assert!(img.pixel(2, 0).is_none());
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = ImageObject::new("bad", vec![0.0; 5], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            ObjectError::ShapeMismatch { rows: 2, cols: 3, expected: 6, actual: 5 }
        ));
    }

    #[test]
    fn overflowing_dimensions_rejected() {
        // rows * cols wraps to 0 in a naive multiply; an empty buffer must
        // still not pass the shape check.
        let err = ImageObject::new("huge", vec![], 1usize << 32, 1usize << 32).unwrap_err();
        assert!(matches!(err, ObjectError::ShapeMismatch { .. }));

        let err = ImageObject::new("huge", vec![0.0; 8], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, ObjectError::ShapeMismatch { .. }));
    }

    #[test]
    fn row_major_indexing() {
        let img = ImageObject::new("i", vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(img.pixel(0, 1), Some(2.0));
        assert_eq!(img.pixel(1, 0), Some(3.0));
    }

    #[test]
    fn transform_defaults_absent() {
        let mut img = ImageObject::new("i", vec![], 0, 0).unwrap();
        assert!(img.x0.is_none() && img.dy.is_none());
        img.set_transform(Some(-1.0), Some(-1.0), Some(0.5), Some(0.5));
        assert_eq!(img.x0, Some(-1.0));
        assert_eq!(img.dy, Some(0.5));
    }
}
