//! Binary field access for fixed-layout records.
//!
//! All multi-byte integers and floats in an `.E3A` record are little-endian;
//! text fields are NUL-padded Windows-1252. Reads are bounds-checked and go
//! through `zerocopy`; writes use `to_le_bytes`. Every accessor takes an
//! absolute byte offset within the record buffer.

use crate::error::{Error, Result};
use encoding_rs::WINDOWS_1252;
use zerocopy::{F32, FromBytes, LE, U16, U32};

fn insufficient(context: &str, expected: usize, available: usize) -> Error {
    Error::RecordDecode {
        context: context.to_string(),
        reason: format!("need {} bytes, record has {}", expected, available),
    }
}

/// Read a little-endian u16 from a record buffer at the given offset.
#[inline]
pub fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    if offset + 2 > data.len() {
        return Err(insufficient("u16", offset + 2, data.len()));
    }
    U16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .map_err(|_| insufficient("u16", offset + 2, data.len()))
}

/// Read a little-endian u32 from a record buffer at the given offset.
#[inline]
pub fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    if offset + 4 > data.len() {
        return Err(insufficient("u32", offset + 4, data.len()));
    }
    U32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| insufficient("u32", offset + 4, data.len()))
}

/// Read a little-endian IEEE-754 f32 from a record buffer at the given offset.
#[inline]
pub fn read_f32(data: &[u8], offset: usize) -> Result<f32> {
    if offset + 4 > data.len() {
        return Err(insufficient("f32", offset + 4, data.len()));
    }
    F32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| insufficient("f32", offset + 4, data.len()))
}

/// Write a little-endian u16 into a record buffer at the given offset.
#[inline]
pub fn write_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Write a little-endian f32 into a record buffer at the given offset.
#[inline]
pub fn write_f32(data: &mut [u8], offset: usize, value: f32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Decode a fixed-width Windows-1252 text field.
///
/// The field ends at the first NUL; trailing spaces are padding and are
/// stripped. `encoding_rs` guarantees valid UTF-8 output.
pub fn read_str(data: &[u8], offset: usize, width: usize) -> Result<String> {
    if offset + width > data.len() {
        return Err(insufficient("text field", offset + width, data.len()));
    }
    let field = &data[offset..offset + width];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let (text, _, _) = WINDOWS_1252.decode(&field[..end]);
    Ok(text.trim_end_matches(' ').to_string())
}

/// Encode a string into a fixed-width, NUL-padded Windows-1252 text field.
///
/// Fails if the string does not fit in `width` bytes or contains characters
/// the codepage cannot represent. The host tool reads these fields with a
/// fixed-length buffer, so silent truncation is never acceptable.
pub fn write_str(data: &mut [u8], offset: usize, width: usize, value: &str, context: &str) -> Result<()> {
    let (encoded, _, had_errors) = WINDOWS_1252.encode(value);
    if had_errors {
        return Err(Error::RecordEncode {
            context: context.to_string(),
            reason: format!("{:?} is not representable in Windows-1252", value),
        });
    }
    if encoded.len() > width {
        return Err(Error::RecordEncode {
            context: context.to_string(),
            reason: format!(
                "{:?} is {} bytes, field holds at most {}",
                value,
                encoded.len(),
                width
            ),
        });
    }
    let field = &mut data[offset..offset + width];
    field.fill(0);
    field[..encoded.len()].copy_from_slice(&encoded);
    Ok(())
}
