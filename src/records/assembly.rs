//! Wall/roof assembly record codec (3187 bytes).
//!
//! Wall and roof assemblies share one record layout: name, overall U-value,
//! surface mass, thickness, and a fixed-capacity layer table. The long tail
//! of the record is not modelled and is carried through the retained base
//! bytes.

use super::base_buffer;
use crate::binary;
use crate::error::{Error, Result};
use crate::layout::assembly as layout;
use crate::model::{Assembly, Layer, RecordBase};

/// Decode one assembly record.
pub fn decode(bytes: &[u8]) -> Result<Assembly> {
    let name = binary::read_str(bytes, layout::NAME, layout::NAME_LEN)?;
    let stored_count = binary::read_u16(bytes, layout::LAYER_COUNT)? as usize;
    let count = stored_count.min(layout::LAYERS.count);
    if stored_count > layout::LAYERS.count {
        tracing::warn!(
            assembly = %name,
            stored_count,
            capacity = layout::LAYERS.count,
            "layer count exceeds table capacity, truncating"
        );
    }

    let mut layers = Vec::with_capacity(count);
    for n in 0..count {
        layers.push(Layer {
            name: binary::read_str(
                bytes,
                layout::LAYERS.at(n, layout::layer::NAME),
                layout::layer::NAME_LEN,
            )?,
            thickness: binary::read_f32(bytes, layout::LAYERS.at(n, layout::layer::THICKNESS))?,
            r_value: binary::read_f32(bytes, layout::LAYERS.at(n, layout::layer::R_VALUE))?,
            density: binary::read_f32(bytes, layout::LAYERS.at(n, layout::layer::DENSITY))?,
            specific_heat: binary::read_f32(
                bytes,
                layout::LAYERS.at(n, layout::layer::SPECIFIC_HEAT),
            )?,
        });
    }

    Ok(Assembly {
        name,
        u_value: binary::read_f32(bytes, layout::U_VALUE)?,
        surface_mass: binary::read_f32(bytes, layout::SURFACE_MASS)?,
        thickness: binary::read_f32(bytes, layout::THICKNESS)?,
        layers,
        base: RecordBase(Some(bytes.to_vec())),
    })
}

/// Encode one assembly record.
pub fn encode(assembly: &Assembly) -> Result<Vec<u8>> {
    let context = format!("assembly {:?}", assembly.name);
    if assembly.layers.len() > layout::LAYERS.count {
        return Err(Error::RecordEncode {
            context,
            reason: format!(
                "{} layers, table holds at most {}",
                assembly.layers.len(),
                layout::LAYERS.count
            ),
        });
    }
    let mut bytes = base_buffer(&assembly.base, layout::RECORD_SIZE, &context)?;

    binary::write_str(&mut bytes, layout::NAME, layout::NAME_LEN, &assembly.name, &context)?;
    binary::write_u16(&mut bytes, layout::LAYER_COUNT, assembly.layers.len() as u16);
    binary::write_f32(&mut bytes, layout::U_VALUE, assembly.u_value);
    binary::write_f32(&mut bytes, layout::SURFACE_MASS, assembly.surface_mass);
    binary::write_f32(&mut bytes, layout::THICKNESS, assembly.thickness);

    for (n, layer) in assembly.layers.iter().enumerate() {
        binary::write_str(
            &mut bytes,
            layout::LAYERS.at(n, layout::layer::NAME),
            layout::layer::NAME_LEN,
            &layer.name,
            &context,
        )?;
        binary::write_f32(&mut bytes, layout::LAYERS.at(n, layout::layer::THICKNESS), layer.thickness);
        binary::write_f32(&mut bytes, layout::LAYERS.at(n, layout::layer::R_VALUE), layer.r_value);
        binary::write_f32(&mut bytes, layout::LAYERS.at(n, layout::layer::DENSITY), layer.density);
        binary::write_f32(
            &mut bytes,
            layout::LAYERS.at(n, layout::layer::SPECIFIC_HEAT),
            layer.specific_heat,
        );
    }

    Ok(bytes)
}
