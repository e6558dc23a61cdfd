//! Window/glazing record codec (126 bytes).

use super::base_buffer;
use crate::binary;
use crate::error::Result;
use crate::layout::window as layout;
use crate::model::{RecordBase, WindowType};

/// Decode one window record.
pub fn decode(bytes: &[u8]) -> Result<WindowType> {
    Ok(WindowType {
        name: binary::read_str(bytes, layout::NAME, layout::NAME_LEN)?,
        u_value: binary::read_f32(bytes, layout::U_VALUE)?,
        shgc: binary::read_f32(bytes, layout::SHGC)?,
        height: binary::read_f32(bytes, layout::HEIGHT)?,
        width: binary::read_f32(bytes, layout::WIDTH)?,
        base: RecordBase(Some(bytes.to_vec())),
    })
}

/// Encode one window record.
pub fn encode(window: &WindowType) -> Result<Vec<u8>> {
    let context = format!("window {:?}", window.name);
    let mut bytes = base_buffer(&window.base, layout::RECORD_SIZE, &context)?;

    binary::write_str(&mut bytes, layout::NAME, layout::NAME_LEN, &window.name, &context)?;
    binary::write_f32(&mut bytes, layout::U_VALUE, window.u_value);
    binary::write_f32(&mut bytes, layout::SHGC, window.shgc);
    binary::write_f32(&mut bytes, layout::HEIGHT, window.height);
    binary::write_f32(&mut bytes, layout::WIDTH, window.width);

    Ok(bytes)
}
