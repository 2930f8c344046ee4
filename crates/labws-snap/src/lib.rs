//! Versioned binary snapshot format for persisting a full lab workspace.
//!
//! A snapshot file holds the complete ordered set of named entries from a
//! workspace in a single container:
//!
//! ```text
//! magic    b"LWSS"
//! major    u16   (hard failure on mismatch)
//! minor    u16   (informational)
//! signals  u32 entry count + entries     (group 1)
//! images   u32 entry count + entries     (group 2)
//! trailer  32-byte BLAKE3 checksum of everything before it
//! ```
//!
//! Each entry is a bincode-encoded [`SnapEntry`] (named `f64` datasets plus
//! scalar attributes), zstd-compressed, preceded by varint sizes and
//! followed by a CRC32 of the compressed bytes. Entries carry their original
//! workspace position so a load reconstructs the exact pre-save ordering
//! across both kind groups.
//!
//! Round-trip fidelity is mandatory: every array value and attribute is
//! reproduced bit-exactly, and absent optional fields stay absent. Any
//! corruption — bad magic, wrong major version, CRC or checksum mismatch,
//! truncation — fails the whole load; no partial result is ever returned.

pub mod entry;
pub mod error;
pub mod reader;
pub mod writer;

pub use entry::SnapEntry;
pub use error::{SnapshotError, SnapshotResult};
pub use reader::{read_snapshot, read_snapshot_bytes};
pub use writer::{write_snapshot, SnapshotWriter};

/// File magic.
pub const MAGIC: &[u8; 4] = b"LWSS";
/// Major format version; a mismatch on load is a hard failure.
pub const FORMAT_MAJOR: u16 = 1;
/// Minor format version; informational only.
pub const FORMAT_MINOR: u16 = 0;

#[cfg(test)]
mod tests {
    use super::*;
    use labws_objects::{DataObject, ImageObject, MetaValue, SignalObject};

    fn sine() -> DataObject {
        let mut sig =
            SignalObject::new("sine", vec![0.0, 1.0, 2.0], vec![0.0, 0.84, 0.91]).unwrap();
        sig.set_labels(Some("time".into()), None);
        sig.set_units(Some("s".into()), Some("V".into()));
        sig.metadata.insert("acquired_by", "bench-2");
        sig.into()
    }

    fn frame() -> DataObject {
        let mut img = ImageObject::new("frame", vec![0.25; 6], 2, 3).unwrap();
        img.set_transform(Some(-1.0), None, Some(0.5), None);
        img.metadata.insert("exposure_ms", 40i64);
        img.into()
    }

    #[test]
    fn roundtrip_mixed_entries_preserves_order() {
        let mut writer = SnapshotWriter::new();
        writer.push("frame", &frame());
        writer.push("sine", &sine());
        writer.push("sine2", &sine());
        let bytes = writer.finish_to_bytes().unwrap();

        let entries = read_snapshot_bytes(&bytes).unwrap();
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        // Image first: global insertion order wins over group order.
        assert_eq!(names, vec!["frame", "sine", "sine2"]);
        assert_eq!(entries[0].1, frame());
        assert_eq!(entries[1].1, sine());
    }

    #[test]
    fn roundtrip_is_bit_exact() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let bytes = writer.finish_to_bytes().unwrap();

        let entries = read_snapshot_bytes(&bytes).unwrap();
        let sig = entries[0].1.as_signal().unwrap();
        assert_eq!(sig.y, vec![0.0, 0.84, 0.91]);
        assert_eq!(sig.xunit.as_deref(), Some("s"));
        assert!(sig.ylabel.is_none());
        // Absent optional arrays stay absent.
        assert!(sig.dx.is_none());
        assert!(sig.dy.is_none());
        assert_eq!(
            sig.metadata.get("acquired_by"),
            Some(&MetaValue::Str("bench-2".into()))
        );
    }

    #[test]
    fn empty_snapshot_roundtrip() {
        let writer = SnapshotWriter::new();
        assert!(writer.is_empty());
        let bytes = writer.finish_to_bytes().unwrap();
        let entries = read_snapshot_bytes(&bytes).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.snap");

        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        writer.push("frame", &frame());
        write_snapshot(&path, writer).unwrap();

        let entries = read_snapshot(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "sine");
        assert_eq!(entries[1].0, "frame");
    }

    #[test]
    fn bad_magic_rejected() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let mut bytes = writer.finish_to_bytes().unwrap();
        bytes[0..4].copy_from_slice(b"NOPE");
        let err = read_snapshot_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidMagic { .. }));
    }

    #[test]
    fn major_version_mismatch_is_hard_failure() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let mut bytes = writer.finish_to_bytes().unwrap();
        bytes[4..6].copy_from_slice(&9u16.to_be_bytes());
        let err = read_snapshot_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion { major: 9 }));
    }

    #[test]
    fn minor_version_mismatch_is_tolerated() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let mut bytes = writer.finish_to_bytes().unwrap();
        bytes[6..8].copy_from_slice(&7u16.to_be_bytes());
        // Minor bump changes the trailer input, so recompute it the way the
        // writer does.
        let body_len = bytes.len() - 32;
        let sum = *blake3::hash(&bytes[..body_len]).as_bytes();
        bytes[body_len..].copy_from_slice(&sum);
        assert!(read_snapshot_bytes(&bytes).is_ok());
    }

    #[test]
    fn corrupted_payload_rejected() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let mut bytes = writer.finish_to_bytes().unwrap();
        // Flip a byte in the middle of the entry payload.
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        assert!(read_snapshot_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_file_rejected() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let bytes = writer.finish_to_bytes().unwrap();
        let err = read_snapshot_bytes(&bytes[..bytes.len() - 8]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Corrupt { .. } | SnapshotError::ChecksumMismatch
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Decoding arbitrary bytes must fail cleanly, never panic.
            #[test]
            fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
                let _ = read_snapshot_bytes(&data);
            }

            #[test]
            fn finite_arrays_roundtrip(
                xs in proptest::collection::vec(-1e12f64..1e12, 0..64)
            ) {
                let ys: Vec<f64> = xs.iter().map(|v| v * 0.5).collect();
                let sig = SignalObject::new("p", xs, ys).unwrap();
                let mut writer = SnapshotWriter::new();
                writer.push("p", &sig.clone().into());
                let bytes = writer.finish_to_bytes().unwrap();
                let entries = read_snapshot_bytes(&bytes).unwrap();
                prop_assert_eq!(entries[0].1.as_signal().unwrap(), &sig);
            }
        }
    }

    #[test]
    fn tampered_trailer_rejected() {
        let mut writer = SnapshotWriter::new();
        writer.push("sine", &sine());
        let mut bytes = writer.finish_to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let err = read_snapshot_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::ChecksumMismatch));
    }
}
