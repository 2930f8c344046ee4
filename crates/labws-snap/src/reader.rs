use std::path::Path;

use labws_objects::DataObject;

use crate::entry::SnapEntry;
use crate::error::{SnapshotError, SnapshotResult};
use crate::writer::decode_varint;
use crate::{FORMAT_MAJOR, MAGIC};

/// Read a snapshot file and return its entries in original workspace order.
pub fn read_snapshot(path: &Path) -> SnapshotResult<Vec<(String, DataObject)>> {
    let bytes = std::fs::read(path)?;
    let entries = read_snapshot_bytes(&bytes)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "snapshot loaded");
    Ok(entries)
}

/// Decode a snapshot from raw bytes.
///
/// The whole file is validated (magic, major version, entry CRCs, trailer
/// checksum) before any entry is returned, so a corrupt file never yields a
/// partial result.
pub fn read_snapshot_bytes(bytes: &[u8]) -> SnapshotResult<Vec<(String, DataObject)>> {
    // magic + versions + two group counts + trailer
    if bytes.len() < 4 + 4 + 8 + 32 {
        return Err(SnapshotError::Corrupt {
            reason: "file too short".into(),
        });
    }
    if &bytes[0..4] != MAGIC {
        return Err(SnapshotError::InvalidMagic {
            expected: String::from_utf8_lossy(MAGIC).into(),
            actual: String::from_utf8_lossy(&bytes[0..4]).into(),
        });
    }
    let major = u16::from_be_bytes([bytes[4], bytes[5]]);
    if major != FORMAT_MAJOR {
        return Err(SnapshotError::UnsupportedVersion { major });
    }

    let body_end = bytes.len() - 32;
    let expected: [u8; 32] = bytes[body_end..]
        .try_into()
        .map_err(|_| SnapshotError::ChecksumMismatch)?;
    let actual = *blake3::hash(&bytes[..body_end]).as_bytes();
    if actual != expected {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let body = &bytes[..body_end];
    let mut pos = 8;
    let mut raw = Vec::new();

    // Group order is fixed: signals first, then images.
    let signal_count = read_u32(body, &mut pos)? as usize;
    for _ in 0..signal_count {
        raw.push(read_entry(body, &mut pos)?);
    }
    let image_count = read_u32(body, &mut pos)? as usize;
    for _ in 0..image_count {
        raw.push(read_entry(body, &mut pos)?);
    }
    if pos != body.len() {
        return Err(SnapshotError::Corrupt {
            reason: format!("trailing bytes: {} unread", body.len() - pos),
        });
    }

    let mut entries: Vec<(u32, String, DataObject)> = Vec::with_capacity(raw.len());
    for (i, entry) in raw.iter().enumerate() {
        let object: DataObject = if i < signal_count {
            entry.to_signal()?.into()
        } else {
            entry.to_image()?.into()
        };
        entries.push((entry.seq, entry.name.clone(), object));
    }

    // Restore global insertion order across both groups.
    entries.sort_by_key(|(seq, _, _)| *seq);
    Ok(entries.into_iter().map(|(_, name, obj)| (name, obj)).collect())
}

fn read_u32(data: &[u8], pos: &mut usize) -> SnapshotResult<u32> {
    let end = *pos + 4;
    if end > data.len() {
        return Err(SnapshotError::Corrupt {
            reason: "truncated group header".into(),
        });
    }
    let value = u32::from_be_bytes(data[*pos..end].try_into().expect("sliced to 4 bytes"));
    *pos = end;
    Ok(value)
}

fn read_entry(data: &[u8], pos: &mut usize) -> SnapshotResult<SnapEntry> {
    let (uncompressed_size, consumed) = decode_varint(&data[*pos..])?;
    *pos += consumed;
    let (compressed_size, consumed) = decode_varint(&data[*pos..])?;
    *pos += consumed;

    let end = usize::try_from(compressed_size)
        .ok()
        .and_then(|size| pos.checked_add(size))
        .filter(|end| end.checked_add(4).is_some_and(|crc_end| crc_end <= data.len()))
        .ok_or_else(|| SnapshotError::Corrupt {
            reason: "entry extends beyond file".into(),
        })?;
    let compressed = &data[*pos..end];
    *pos = end;

    let expected_crc = u32::from_be_bytes(
        data[*pos..*pos + 4]
            .try_into()
            .expect("sliced to 4 bytes"),
    );
    *pos += 4;

    if crc32fast::hash(compressed) != expected_crc {
        // Name is unknown until the payload decodes, which we cannot trust.
        return Err(SnapshotError::CrcMismatch {
            name: "<unreadable>".into(),
        });
    }

    let payload = zstd::decode_all(compressed)
        .map_err(|e| SnapshotError::Decompression(e.to_string()))?;
    if payload.len() != uncompressed_size as usize {
        return Err(SnapshotError::Corrupt {
            reason: format!(
                "size mismatch: expected {uncompressed_size}, got {}",
                payload.len()
            ),
        });
    }

    bincode::deserialize(&payload).map_err(|e| SnapshotError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SnapshotWriter;
    use labws_objects::{ImageObject, SignalObject};

    #[test]
    fn missing_file_is_io_error() {
        let err = read_snapshot(Path::new("/nonexistent/bench.snap")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }

    #[test]
    fn too_short_rejected() {
        let err = read_snapshot_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt { .. }));
    }

    #[test]
    fn kind_split_uses_group_position() {
        // An image whose dataset list could look signal-ish must still come
        // back as an image because it sits in the second group.
        let sig: labws_objects::DataObject =
            SignalObject::new("s", vec![0.0], vec![1.0]).unwrap().into();
        let img: labws_objects::DataObject =
            ImageObject::new("i", vec![0.0; 4], 2, 2).unwrap().into();

        let mut writer = SnapshotWriter::new();
        writer.push("i", &img);
        writer.push("s", &sig);
        let bytes = writer.finish_to_bytes().unwrap();

        let entries = read_snapshot_bytes(&bytes).unwrap();
        assert_eq!(entries[0].0, "i");
        assert!(entries[0].1.as_image().is_some());
        assert!(entries[1].1.as_signal().is_some());
    }
}
