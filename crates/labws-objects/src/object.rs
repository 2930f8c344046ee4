use serde::{Deserialize, Serialize};

use crate::image::ImageObject;
use crate::metadata::Metadata;
use crate::signal::SignalObject;

/// The kind of data object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// 1-D signal (paired x/y arrays).
    Signal,
    /// 2-D image (row-major pixel grid).
    Image,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signal => write!(f, "signal"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// A named scientific data object: the closed variant the workspace stores.
///
/// Dispatch is explicit over the two kinds; the shared capability surface
/// (title, metadata) is exposed through accessors so callers never need to
/// match on the variant for common operations. `Clone` performs the deep
/// defensive copy used at both store boundaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataObject {
    Signal(SignalObject),
    Image(ImageObject),
}

impl DataObject {
    /// Kind tag for this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Signal(_) => ObjectKind::Signal,
            Self::Image(_) => ObjectKind::Image,
        }
    }

    /// Object title.
    pub fn title(&self) -> &str {
        match self {
            Self::Signal(s) => &s.title,
            Self::Image(i) => &i.title,
        }
    }

    /// Replace the object title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        match self {
            Self::Signal(s) => s.title = title,
            Self::Image(i) => i.title = title,
        }
    }

    /// Shared metadata attributes.
    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Signal(s) => &s.metadata,
            Self::Image(i) => &i.metadata,
        }
    }

    /// Mutable metadata attributes.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        match self {
            Self::Signal(s) => &mut s.metadata,
            Self::Image(i) => &mut i.metadata,
        }
    }

    /// The signal variant, if this is one.
    pub fn as_signal(&self) -> Option<&SignalObject> {
        match self {
            Self::Signal(s) => Some(s),
            Self::Image(_) => None,
        }
    }

    /// The image variant, if this is one.
    pub fn as_image(&self) -> Option<&ImageObject> {
        match self {
            Self::Image(i) => Some(i),
            Self::Signal(_) => None,
        }
    }
}

impl From<SignalObject> for DataObject {
    fn from(s: SignalObject) -> Self {
        Self::Signal(s)
    }
}

impl From<ImageObject> for DataObject {
    fn from(i: ImageObject) -> Self {
        Self::Image(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal() -> DataObject {
        SignalObject::new("s", vec![0.0, 1.0], vec![2.0, 3.0])
            .unwrap()
            .into()
    }

    fn image() -> DataObject {
        ImageObject::new("i", vec![0.0; 4], 2, 2).unwrap().into()
    }

    #[test]
    fn kind_dispatch() {
        assert_eq!(signal().kind(), ObjectKind::Signal);
        assert_eq!(image().kind(), ObjectKind::Image);
        assert_eq!(format!("{}", ObjectKind::Signal), "signal");
        assert_eq!(format!("{}", ObjectKind::Image), "image");
    }

    #[test]
    fn title_accessors() {
        let mut obj = signal();
        assert_eq!(obj.title(), "s");
        obj.set_title("renamed");
        assert_eq!(obj.title(), "renamed");
    }

    #[test]
    fn variant_accessors() {
        let s = signal();
        assert!(s.as_signal().is_some());
        assert!(s.as_image().is_none());
        let i = image();
        assert!(i.as_image().is_some());
        assert!(i.as_signal().is_none());
    }

    #[test]
    fn metadata_shared_surface() {
        let mut obj = image();
        obj.metadata_mut().insert("exposure_ms", 40i64);
        assert_eq!(obj.metadata().len(), 1);
    }
}
