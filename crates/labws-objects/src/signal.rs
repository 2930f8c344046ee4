use serde::{Deserialize, Serialize};

use crate::error::{ObjectError, ObjectResult};
use crate::metadata::Metadata;

/// A 1-D signal: paired x/y arrays with optional per-point error bars.
///
/// Shape invariants (`x.len() == y.len()`, error arrays match when present)
/// are enforced at construction and whenever error bars are attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalObject {
    pub title: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub dx: Option<Vec<f64>>,
    pub dy: Option<Vec<f64>>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xunit: Option<String>,
    pub yunit: Option<String>,
    pub metadata: Metadata,
}

impl SignalObject {
    /// Create a signal from paired arrays.
    pub fn new(title: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> ObjectResult<Self> {
        if y.len() != x.len() {
            return Err(ObjectError::LengthMismatch {
                array: "y",
                expected: x.len(),
                actual: y.len(),
            });
        }
        Ok(Self {
            title: title.into(),
            x,
            y,
            dx: None,
            dy: None,
            xlabel: None,
            ylabel: None,
            xunit: None,
            yunit: None,
            metadata: Metadata::new(),
        })
    }

    /// Attach error bars. Either array may be omitted; present arrays must
    /// match the signal length.
    pub fn set_error_bars(
        &mut self,
        dx: Option<Vec<f64>>,
        dy: Option<Vec<f64>>,
    ) -> ObjectResult<()> {
        if let Some(dx) = &dx {
            if dx.len() != self.x.len() {
                return Err(ObjectError::LengthMismatch {
                    array: "dx",
                    expected: self.x.len(),
                    actual: dx.len(),
                });
            }
        }
        if let Some(dy) = &dy {
            if dy.len() != self.y.len() {
                return Err(ObjectError::LengthMismatch {
                    array: "dy",
                    expected: self.y.len(),
                    actual: dy.len(),
                });
            }
        }
        self.dx = dx;
        self.dy = dy;
        Ok(())
    }

    /// Set axis labels.
    pub fn set_labels(&mut self, xlabel: Option<String>, ylabel: Option<String>) {
        self.xlabel = xlabel;
        self.ylabel = ylabel;
    }

    /// Set axis units.
    pub fn set_units(&mut self, xunit: Option<String>, yunit: Option<String>) {
        self.xunit = xunit;
        self.yunit = yunit;
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if the signal has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_construction() {
        let s = SignalObject::new("sine", vec![0.0, 1.0, 2.0], vec![0.0, 0.84, 0.91]).unwrap();
        assert_eq!(s.title, "sine");
        assert_eq!(s.len(), 3);
        assert!(s.dx.is_none());
        assert!(s.dy.is_none());
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = SignalObject::new("bad", vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            ObjectError::LengthMismatch { array: "y", expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn error_bars_validated() {
        let mut s = SignalObject::new("s", vec![0.0, 1.0], vec![2.0, 3.0]).unwrap();
        s.set_error_bars(Some(vec![0.1, 0.1]), Some(vec![0.2, 0.2])).unwrap();
        assert_eq!(s.dx.as_deref(), Some(&[0.1, 0.1][..]));

        let err = s.set_error_bars(Some(vec![0.1]), None).unwrap_err();
        assert!(matches!(err, ObjectError::LengthMismatch { array: "dx", .. }));
        // Failed attach leaves prior bars untouched
        assert!(s.dx.is_some());
    }

    #[test]
    fn partial_error_bars_allowed() {
        let mut s = SignalObject::new("s", vec![0.0], vec![1.0]).unwrap();
        s.set_error_bars(None, Some(vec![0.5])).unwrap();
        assert!(s.dx.is_none());
        assert!(s.dy.is_some());
    }

    #[test]
    fn labels_and_units() {
        let mut s = SignalObject::new("s", vec![], vec![]).unwrap();
        assert!(s.is_empty());
        s.set_labels(Some("time".into()), Some("amplitude".into()));
        s.set_units(Some("s".into()), Some("V".into()));
        assert_eq!(s.xlabel.as_deref(), Some("time"));
        assert_eq!(s.yunit.as_deref(), Some("V"));
    }

    #[test]
    fn clone_is_deep() {
        let mut s = SignalObject::new("s", vec![1.0], vec![2.0]).unwrap();
        let copy = s.clone();
        s.y[0] = 99.0;
        assert_eq!(copy.y[0], 2.0);
    }
}
