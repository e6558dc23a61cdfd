//! Fixed-width record codecs.
//!
//! Each record kind has a fixed size and a declarative offset table in
//! [`crate::layout`]. The codecs translate bytes to model fields and back and
//! never touch stream buffers except through those translations. Encoding
//! patches fields over a record's retained base bytes (or a zeroed buffer for
//! records built in memory), which keeps unmodelled regions byte-exact.

pub mod assembly;
pub mod schedule;
pub mod space;
pub mod window;

use crate::binary;
use crate::error::{Error, Result};
use crate::layout::REF_UNSET;
use crate::model::{Code, RecordBase, Ref};
use crate::tables::EnumTable;
use std::collections::HashMap;
use std::slice::ChunksExact;

/// Split a stream into records, enforcing the exact-multiple invariant.
pub fn split<'a>(
    stream: &'a [u8],
    record_size: usize,
    name: &'static str,
) -> Result<ChunksExact<'a, u8>> {
    let remainder = stream.len() % record_size;
    if remainder != 0 {
        return Err(Error::StreamSize {
            stream: name,
            len: stream.len(),
            record_size,
            remainder,
        });
    }
    Ok(stream.chunks_exact(record_size))
}

/// Start an encode buffer from a record's retained bytes, or zeros for a
/// record that was never on disk.
pub(crate) fn base_buffer(base: &RecordBase, size: usize, context: &str) -> Result<Vec<u8>> {
    match &base.0 {
        Some(bytes) if bytes.len() == size => Ok(bytes.clone()),
        Some(bytes) => Err(Error::RecordEncode {
            context: context.to_string(),
            reason: format!(
                "retained record bytes are {} long, expected {}",
                bytes.len(),
                size
            ),
        }),
        None => Ok(vec![0u8; size]),
    }
}

/// Name → index map for one collection, built once per encode.
#[derive(Debug)]
pub(crate) struct NameIndex {
    what: &'static str,
    map: HashMap<String, u16>,
}

impl NameIndex {
    /// Build the map from a collection's names in order. Names are trimmed;
    /// lookups are case-sensitive. Duplicate names are fatal because index
    /// resolution would be ambiguous.
    pub(crate) fn build<'a>(
        names: impl Iterator<Item = &'a str>,
        what: &'static str,
    ) -> Result<Self> {
        let mut map = HashMap::new();
        for (i, name) in names.enumerate() {
            let key = name.trim().to_string();
            if let Some(&first) = map.get(&key) {
                return Err(Error::UnresolvedReference {
                    field: what.to_string(),
                    name: format!("{} (duplicate at positions {} and {})", key, first, i),
                });
            }
            map.insert(key, i as u16);
        }
        Ok(Self { what, map })
    }

    pub(crate) fn resolve(&self, reference: &Ref, field: &str) -> Result<u16> {
        match reference {
            Ref::None => Ok(REF_UNSET),
            Ref::Named(name) => {
                self.map
                    .get(name.trim())
                    .copied()
                    .ok_or_else(|| Error::UnresolvedReference {
                        field: field.to_string(),
                        name: name.trim().to_string(),
                    })
            },
            Ref::Raw(index) => {
                tracing::warn!(field, index, what = self.what, "re-encoding raw reference");
                Ok(*index)
            },
        }
    }
}

/// Index → name lookup for one collection, used on decode.
pub(crate) struct NameList<'a> {
    what: &'static str,
    names: Vec<&'a str>,
}

impl<'a> NameList<'a> {
    pub(crate) fn new(names: Vec<&'a str>, what: &'static str) -> Self {
        Self { what, names }
    }

    pub(crate) fn lookup(&self, index: u16) -> Ref {
        if index == REF_UNSET {
            Ref::None
        } else if let Some(name) = self.names.get(index as usize) {
            Ref::Named((*name).to_string())
        } else {
            tracing::warn!(
                index,
                what = self.what,
                len = self.names.len(),
                "reference index out of range, preserving raw"
            );
            Ref::Raw(index)
        }
    }
}

/// Resolution context for encoding space records.
pub(crate) struct EncodeMaps {
    pub schedules: NameIndex,
    pub walls: NameIndex,
    pub roofs: NameIndex,
    pub windows: NameIndex,
}

/// Resolution context for decoding space records.
pub(crate) struct DecodeNames<'a> {
    pub schedules: NameList<'a>,
    pub walls: NameList<'a>,
    pub roofs: NameList<'a>,
    pub windows: NameList<'a>,
}

pub(crate) fn write_ref(
    buf: &mut [u8],
    offset: usize,
    reference: &Ref,
    index: &NameIndex,
    field: &str,
) -> Result<()> {
    binary::write_u16(buf, offset, index.resolve(reference, field)?);
    Ok(())
}

pub(crate) fn read_ref(buf: &[u8], offset: usize, names: &NameList<'_>) -> Result<Ref> {
    Ok(names.lookup(binary::read_u16(buf, offset)?))
}

pub(crate) fn write_code(
    buf: &mut [u8],
    offset: usize,
    code: &Code,
    table: &EnumTable,
) -> Result<()> {
    let value = match code {
        Code::Name(name) => table.code(name)?,
        Code::Raw(raw) => *raw,
    };
    binary::write_u16(buf, offset, value);
    Ok(())
}

pub(crate) fn read_code(buf: &[u8], offset: usize, table: &EnumTable) -> Result<Code> {
    let value = binary::read_u16(buf, offset)?;
    match table.name(value) {
        Some(name) => Ok(Code::Name(name.to_string())),
        None => {
            tracing::debug!(field = table.field(), value, "unknown code, preserving raw");
            Ok(Code::Raw(value))
        },
    }
}
