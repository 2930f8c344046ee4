use labws_objects::{DataObject, ImageObject, MetaValue, Metadata, SignalObject};
use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, SnapshotResult};

/// Attribute-name prefix for user metadata, keeping it clear of the
/// reserved attribute names (title, labels, units, geometry).
const META_PREFIX: &str = "meta:";

/// One serialized workspace entry: named numeric datasets plus scalar
/// attributes, mirroring the dataset/attribute split of hierarchical
/// scientific containers.
///
/// `seq` is the entry's global insertion position in the workspace at save
/// time; the reader sorts on it so ordering survives the split into kind
/// groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapEntry {
    pub seq: u32,
    pub name: String,
    pub datasets: Vec<(String, Vec<f64>)>,
    pub attrs: Vec<(String, MetaValue)>,
}

impl SnapEntry {
    /// Build an entry from a workspace object.
    pub fn from_object(seq: u32, name: &str, object: &DataObject) -> Self {
        match object {
            DataObject::Signal(sig) => Self::from_signal(seq, name, sig),
            DataObject::Image(img) => Self::from_image(seq, name, img),
        }
    }

    fn from_signal(seq: u32, name: &str, sig: &SignalObject) -> Self {
        let mut datasets = vec![("x".into(), sig.x.clone()), ("y".into(), sig.y.clone())];
        if let Some(dx) = &sig.dx {
            datasets.push(("dx".into(), dx.clone()));
        }
        if let Some(dy) = &sig.dy {
            datasets.push(("dy".into(), dy.clone()));
        }

        let mut attrs = vec![("title".into(), MetaValue::Str(sig.title.clone()))];
        push_opt_str(&mut attrs, "xlabel", &sig.xlabel);
        push_opt_str(&mut attrs, "ylabel", &sig.ylabel);
        push_opt_str(&mut attrs, "xunit", &sig.xunit);
        push_opt_str(&mut attrs, "yunit", &sig.yunit);
        push_metadata(&mut attrs, &sig.metadata);

        Self { seq, name: name.into(), datasets, attrs }
    }

    fn from_image(seq: u32, name: &str, img: &ImageObject) -> Self {
        let datasets = vec![("data".into(), img.data.clone())];

        let mut attrs = vec![
            ("title".into(), MetaValue::Str(img.title.clone())),
            ("rows".into(), MetaValue::Int(img.rows as i64)),
            ("cols".into(), MetaValue::Int(img.cols as i64)),
        ];
        push_opt_float(&mut attrs, "x0", img.x0);
        push_opt_float(&mut attrs, "y0", img.y0);
        push_opt_float(&mut attrs, "dx", img.dx);
        push_opt_float(&mut attrs, "dy", img.dy);
        push_opt_str(&mut attrs, "xlabel", &img.xlabel);
        push_opt_str(&mut attrs, "ylabel", &img.ylabel);
        push_opt_str(&mut attrs, "zlabel", &img.zlabel);
        push_opt_str(&mut attrs, "xunit", &img.xunit);
        push_opt_str(&mut attrs, "yunit", &img.yunit);
        push_opt_str(&mut attrs, "zunit", &img.zunit);
        push_metadata(&mut attrs, &img.metadata);

        Self { seq, name: name.into(), datasets, attrs }
    }

    /// Reconstruct a signal object from this entry.
    pub fn to_signal(&self) -> SnapshotResult<SignalObject> {
        let x = self.require_dataset("x")?;
        let y = self.require_dataset("y")?;
        let mut sig = SignalObject::new(self.title(), x, y).map_err(|e| self.corrupt(e))?;
        sig.set_error_bars(self.dataset("dx"), self.dataset("dy"))
            .map_err(|e| self.corrupt(e))?;
        sig.set_labels(self.str_attr("xlabel"), self.str_attr("ylabel"));
        sig.set_units(self.str_attr("xunit"), self.str_attr("yunit"));
        sig.metadata = self.user_metadata();
        Ok(sig)
    }

    /// Reconstruct an image object from this entry.
    pub fn to_image(&self) -> SnapshotResult<ImageObject> {
        let data = self.require_dataset("data")?;
        let rows = self.usize_attr("rows")?;
        let cols = self.usize_attr("cols")?;
        let mut img =
            ImageObject::new(self.title(), data, rows, cols).map_err(|e| self.corrupt(e))?;
        img.set_transform(
            self.float_attr("x0"),
            self.float_attr("y0"),
            self.float_attr("dx"),
            self.float_attr("dy"),
        );
        img.xlabel = self.str_attr("xlabel");
        img.ylabel = self.str_attr("ylabel");
        img.zlabel = self.str_attr("zlabel");
        img.xunit = self.str_attr("xunit");
        img.yunit = self.str_attr("yunit");
        img.zunit = self.str_attr("zunit");
        img.metadata = self.user_metadata();
        Ok(img)
    }

    fn title(&self) -> String {
        match self.attr("title") {
            Some(MetaValue::Str(s)) => s.clone(),
            _ => self.name.clone(),
        }
    }

    fn attr(&self, key: &str) -> Option<&MetaValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn str_attr(&self, key: &str) -> Option<String> {
        match self.attr(key) {
            Some(MetaValue::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn float_attr(&self, key: &str) -> Option<f64> {
        match self.attr(key) {
            Some(MetaValue::Float(x)) => Some(*x),
            _ => None,
        }
    }

    fn usize_attr(&self, key: &str) -> SnapshotResult<usize> {
        match self.attr(key) {
            Some(MetaValue::Int(i)) if *i >= 0 => Ok(*i as usize),
            Some(other) => Err(SnapshotError::Corrupt {
                reason: format!("entry '{}': attribute '{key}' has invalid value {other}", self.name),
            }),
            None => Err(SnapshotError::Corrupt {
                reason: format!("entry '{}': missing attribute '{key}'", self.name),
            }),
        }
    }

    fn dataset(&self, key: &str) -> Option<Vec<f64>> {
        self.datasets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn require_dataset(&self, key: &str) -> SnapshotResult<Vec<f64>> {
        self.dataset(key).ok_or_else(|| SnapshotError::Corrupt {
            reason: format!("entry '{}': missing dataset '{key}'", self.name),
        })
    }

    fn user_metadata(&self) -> Metadata {
        self.attrs
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(META_PREFIX)
                    .map(|key| (key.to_string(), v.clone()))
            })
            .collect()
    }

    fn corrupt(&self, err: impl std::fmt::Display) -> SnapshotError {
        SnapshotError::Corrupt {
            reason: format!("entry '{}': {err}", self.name),
        }
    }
}

fn push_opt_str(attrs: &mut Vec<(String, MetaValue)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        attrs.push((key.into(), MetaValue::Str(v.clone())));
    }
}

fn push_opt_float(attrs: &mut Vec<(String, MetaValue)>, key: &str, value: Option<f64>) {
    if let Some(v) = value {
        attrs.push((key.into(), MetaValue::Float(v)));
    }
}

fn push_metadata(attrs: &mut Vec<(String, MetaValue)>, metadata: &Metadata) {
    for (k, v) in metadata.iter() {
        attrs.push((format!("{META_PREFIX}{k}"), v.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal_with_extras() -> SignalObject {
        let mut sig = SignalObject::new("s", vec![0.0, 1.0], vec![2.0, 3.0]).unwrap();
        sig.set_error_bars(Some(vec![0.1, 0.1]), None).unwrap();
        sig.set_units(Some("s".into()), None);
        sig.metadata.insert("run", 7i64);
        sig
    }

    #[test]
    fn signal_entry_roundtrip() {
        let sig = signal_with_extras();
        let entry = SnapEntry::from_object(3, "s", &sig.clone().into());
        assert_eq!(entry.seq, 3);
        let back = entry.to_signal().unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn image_entry_roundtrip() {
        let mut img = ImageObject::new("i", vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        img.set_transform(Some(0.5), Some(0.5), None, None);
        img.zlabel = Some("counts".into());
        img.metadata.insert("dark_corrected", true);

        let entry = SnapEntry::from_object(0, "i", &img.clone().into());
        let back = entry.to_image().unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn absent_optionals_stay_absent() {
        let sig = SignalObject::new("s", vec![0.0], vec![1.0]).unwrap();
        let entry = SnapEntry::from_object(0, "s", &sig.into());
        assert!(entry.datasets.iter().all(|(k, _)| k != "dx" && k != "dy"));
        let back = entry.to_signal().unwrap();
        assert!(back.dx.is_none());
        assert!(back.xunit.is_none());
    }

    #[test]
    fn missing_dataset_is_corrupt() {
        let sig = SignalObject::new("s", vec![0.0], vec![1.0]).unwrap();
        let mut entry = SnapEntry::from_object(0, "s", &sig.into());
        entry.datasets.retain(|(k, _)| k != "y");
        let err = entry.to_signal().unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt { .. }));
    }

    #[test]
    fn negative_dimension_is_corrupt() {
        let img = ImageObject::new("i", vec![0.0], 1, 1).unwrap();
        let mut entry = SnapEntry::from_object(0, "i", &img.into());
        for (k, v) in entry.attrs.iter_mut() {
            if k == "rows" {
                *v = MetaValue::Int(-1);
            }
        }
        assert!(entry.to_image().is_err());
    }

    #[test]
    fn overflowing_dimensions_are_corrupt() {
        // A crafted file can carry any i64 in the dimension attributes; the
        // reconstruction must reject them, never panic.
        let img = ImageObject::new("i", vec![0.0], 1, 1).unwrap();
        let mut entry = SnapEntry::from_object(0, "i", &img.into());
        for (k, v) in entry.attrs.iter_mut() {
            if k == "rows" || k == "cols" {
                *v = MetaValue::Int(1i64 << 32);
            }
        }
        let err = entry.to_image().unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt { .. }));
    }

    #[test]
    fn metadata_keys_do_not_collide_with_reserved_attrs() {
        let mut sig = SignalObject::new("s", vec![0.0], vec![1.0]).unwrap();
        sig.metadata.insert("title", "not the real title");
        let entry = SnapEntry::from_object(0, "s", &sig.clone().into());
        let back = entry.to_signal().unwrap();
        assert_eq!(back.title, "s");
        assert_eq!(
            back.metadata.get("title"),
            Some(&MetaValue::Str("not the real title".into()))
        );
    }
}
