//! `.E3A` container handling.
//!
//! An `.E3A` file is a Deflate ZIP archive whose entries are fixed-name byte
//! streams. The codec understands five of them and must round-trip every
//! other entry byte-exactly, so the container is modelled as an ordered list
//! of `(name, bytes)` pairs rather than a map: write order is read order.

use crate::error::{Error, Result};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Hourly/annual schedule records.
pub const SCHEDULE_STREAM: &str = "HAP51SCH.DAT";
/// Space (thermal zone) records.
pub const SPACE_STREAM: &str = "HAP51SPC.DAT";
/// Wall assembly records.
pub const WALL_STREAM: &str = "HAP51WAL.DAT";
/// Roof assembly records.
pub const ROOF_STREAM: &str = "HAP51ROF.DAT";
/// Window/glazing records.
pub const WINDOW_STREAM: &str = "HAP51WIN.DAT";

/// The five streams the codec understands. Everything else is preserved
/// verbatim.
pub const KNOWN_STREAMS: [&str; 5] = [
    SCHEDULE_STREAM,
    SPACE_STREAM,
    WALL_STREAM,
    ROOF_STREAM,
    WINDOW_STREAM,
];

/// A named byte stream inside the archive.
#[derive(Debug, Clone)]
pub struct StreamEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// An `.E3A` archive held fully in memory.
///
/// I/O happens only at the open/close boundary; all stream edits operate on
/// the in-memory entry list.
#[derive(Debug, Clone, Default)]
pub struct Container {
    entries: Vec<StreamEntry>,
}

impl Container {
    /// Parse an archive from raw file bytes.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::Container(format!("not a valid .E3A archive: {}", e)))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::Container(format!("unreadable archive entry {}: {}", i, e)))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(StreamEntry { name, data });
        }
        Ok(Self { entries })
    }

    /// Open and parse an archive from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::read(&bytes)
    }

    /// Look up a stream by name.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Look up a stream the format requires to be present.
    pub fn require(&self, name: &str) -> Result<&[u8]> {
        self.get(name)
            .ok_or_else(|| Error::Container(format!("required stream {} is missing", name)))
    }

    /// Replace a stream's bytes, preserving its position in the entry order.
    /// A name not yet present is appended.
    pub fn replace(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.data = data,
            None => self.entries.push(StreamEntry {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Iterate over all entries in archive order.
    pub fn entries(&self) -> impl Iterator<Item = &StreamEntry> {
        self.entries.iter()
    }

    /// Serialize the archive, emitting every entry with Deflate compression.
    pub fn write(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for entry in &self.entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| Error::Container(format!("cannot start entry {}: {}", entry.name, e)))?;
            writer.write_all(&entry.data)?;
        }
        let cursor = writer
            .finish()
            .map_err(|e| Error::Container(format!("cannot finalize archive: {}", e)))?;
        Ok(cursor.into_inner())
    }

    /// Write the archive to disk via a sibling temp path and an atomic rename,
    /// so the destination is never left half-written.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.write()?;
        let tmp = path.with_extension("E3A.tmp");
        if let Err(e) = std::fs::write(&tmp, &bytes) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_unknown_streams() {
        let mut container = Container::default();
        container.replace(SCHEDULE_STREAM, vec![0u8; 16]);
        let foreign: Vec<u8> = (0..=255u8).collect();
        container.replace("FOO.DAT", foreign.clone());

        let bytes = container.write().unwrap();
        let reread = Container::read(&bytes).unwrap();
        assert_eq!(reread.get("FOO.DAT"), Some(foreign.as_slice()));
        assert_eq!(reread.get(SCHEDULE_STREAM), Some(&[0u8; 16][..]));
    }

    #[test]
    fn test_replace_keeps_entry_order() {
        let mut container = Container::default();
        container.replace("A.DAT", vec![1]);
        container.replace("B.DAT", vec![2]);
        container.replace("A.DAT", vec![3]);
        let names: Vec<&str> = container.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A.DAT", "B.DAT"]);
        assert_eq!(container.get("A.DAT"), Some(&[3u8][..]));
    }

    #[test]
    fn test_not_an_archive() {
        assert!(matches!(
            Container::read(b"this is not a zip"),
            Err(Error::Container(_))
        ));
    }

    #[test]
    fn test_require_missing_stream() {
        let container = Container::default();
        assert!(matches!(
            container.require(SPACE_STREAM),
            Err(Error::Container(_))
        ));
    }
}
