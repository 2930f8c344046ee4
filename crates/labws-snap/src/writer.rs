use std::path::Path;

use labws_objects::DataObject;

use crate::entry::SnapEntry;
use crate::error::{SnapshotError, SnapshotResult};
use crate::{FORMAT_MAJOR, FORMAT_MINOR, MAGIC};

const ZSTD_LEVEL: i32 = 3;

/// Builds a snapshot from the ordered entries of a workspace.
///
/// Entries are pushed in workspace listing order; the writer splits them
/// into the two kind groups while stamping each with its global position.
pub struct SnapshotWriter {
    signals: Vec<SnapEntry>,
    images: Vec<SnapEntry>,
    next_seq: u32,
}

impl SnapshotWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self {
            signals: Vec::new(),
            images: Vec::new(),
            next_seq: 0,
        }
    }

    /// Append one named object. Call in workspace listing order.
    pub fn push(&mut self, name: &str, object: &DataObject) {
        let entry = SnapEntry::from_object(self.next_seq, name, object);
        self.next_seq += 1;
        match object {
            DataObject::Signal(_) => self.signals.push(entry),
            DataObject::Image(_) => self.images.push(entry),
        }
    }

    /// Number of entries queued.
    pub fn len(&self) -> usize {
        self.signals.len() + self.images.len()
    }

    /// Returns `true` if no entries were pushed.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.images.is_empty()
    }

    /// Serialize the snapshot to bytes.
    pub fn finish_to_bytes(self) -> SnapshotResult<Vec<u8>> {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&FORMAT_MAJOR.to_be_bytes());
        buf.extend_from_slice(&FORMAT_MINOR.to_be_bytes());

        write_group(&mut buf, &self.signals)?;
        write_group(&mut buf, &self.images)?;

        let checksum = *blake3::hash(&buf).as_bytes();
        buf.extend_from_slice(&checksum);
        Ok(buf)
    }
}

impl Default for SnapshotWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a snapshot file to disk.
pub fn write_snapshot(path: &Path, writer: SnapshotWriter) -> SnapshotResult<()> {
    let count = writer.len();
    let bytes = writer.finish_to_bytes()?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), entries = count, "snapshot written");
    Ok(())
}

fn write_group(buf: &mut Vec<u8>, entries: &[SnapEntry]) -> SnapshotResult<()> {
    buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        let payload =
            bincode::serialize(entry).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        let compressed = zstd::encode_all(payload.as_slice(), ZSTD_LEVEL)
            .map_err(|e| SnapshotError::Compression(e.to_string()))?;

        encode_varint(buf, payload.len() as u64);
        encode_varint(buf, compressed.len() as u64);
        buf.extend_from_slice(&compressed);
        buf.extend_from_slice(&crc32fast::hash(&compressed).to_be_bytes());
    }
    Ok(())
}

/// Encode a u64 as a variable-length integer.
pub(crate) fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Decode a variable-length integer. Returns (value, bytes_consumed).
pub(crate) fn decode_varint(data: &[u8]) -> SnapshotResult<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        value |= ((byte & 0x7F) as u64) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        if shift >= 64 {
            return Err(SnapshotError::Corrupt {
                reason: "varint overflow".into(),
            });
        }
    }
    Err(SnapshotError::Corrupt {
        reason: "truncated varint".into(),
    })
}
