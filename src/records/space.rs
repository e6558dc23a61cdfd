//! Space record codec (682 bytes).
//!
//! A space record packs general geometry, the four internal-gains blocks, the
//! infiltration block, floor segments, partitions, up to 8 exterior walls and
//! up to 4 roofs. Assemblies, window types and schedules are stored as 16-bit
//! stream indices; translation to and from names happens here, against the
//! resolution maps the codec builds per encode/decode.

use super::{DecodeNames, EncodeMaps, base_buffer, read_code, read_ref, write_code, write_ref};
use crate::binary;
use crate::error::{Error, Result};
use crate::layout::space as layout;
use crate::model::{
    EquipmentGains, ExteriorWall, FloorSegment, Infiltration, InfiltrationEntry, LightingGains,
    MiscGains, Partition, PeopleGains, RecordBase, RoofSegment, Space,
};
use crate::tables;

fn read_partition(bytes: &[u8], n: usize) -> Result<Partition> {
    use crate::layout::space::partition::*;
    Ok(Partition {
        u_value: binary::read_f32(bytes, layout::PARTITIONS.at(n, U_VALUE))?,
        area: binary::read_f32(bytes, layout::PARTITIONS.at(n, AREA))?,
        adjacent_temp: binary::read_f32(bytes, layout::PARTITIONS.at(n, ADJACENT_TEMP))?,
    })
}

fn write_partition(bytes: &mut [u8], n: usize, partition: &Partition) {
    use crate::layout::space::partition::*;
    binary::write_f32(bytes, layout::PARTITIONS.at(n, U_VALUE), partition.u_value);
    binary::write_f32(bytes, layout::PARTITIONS.at(n, AREA), partition.area);
    binary::write_f32(
        bytes,
        layout::PARTITIONS.at(n, ADJACENT_TEMP),
        partition.adjacent_temp,
    );
}

/// Decode one space record.
pub(crate) fn decode(bytes: &[u8], names: &DecodeNames<'_>) -> Result<Space> {
    let name = binary::read_str(bytes, layout::NAME, layout::NAME_LEN)?;

    let wall_count = (binary::read_u16(bytes, layout::WALL_COUNT)? as usize).min(layout::WALLS.count);
    let mut walls = Vec::with_capacity(wall_count);
    for n in 0..wall_count {
        use crate::layout::space::wall::*;
        walls.push(ExteriorWall {
            orientation: read_code(bytes, layout::WALLS.at(n, ORIENTATION), &tables::ORIENTATION)?,
            tilt: read_code(bytes, layout::WALLS.at(n, TILT), &tables::WALL_TILT)?,
            wall_type: read_ref(bytes, layout::WALLS.at(n, WALL_TYPE), &names.walls)?,
            gross_area: binary::read_f32(bytes, layout::WALLS.at(n, GROSS_AREA))?,
            window_type: read_ref(bytes, layout::WALLS.at(n, WINDOW_TYPE), &names.windows)?,
            window_area: binary::read_f32(bytes, layout::WALLS.at(n, WINDOW_AREA))?,
            window_count: binary::read_u16(bytes, layout::WALLS.at(n, WINDOW_COUNT))?,
            overhang_projection: binary::read_f32(bytes, layout::WALLS.at(n, OVERHANG_PROJECTION))?,
            overhang_offset: binary::read_f32(bytes, layout::WALLS.at(n, OVERHANG_OFFSET))?,
        });
    }

    let roof_count = (binary::read_u16(bytes, layout::ROOF_COUNT)? as usize).min(layout::ROOFS.count);
    let mut roofs = Vec::with_capacity(roof_count);
    for n in 0..roof_count {
        use crate::layout::space::roof::*;
        roofs.push(RoofSegment {
            orientation: read_code(bytes, layout::ROOFS.at(n, ORIENTATION), &tables::ORIENTATION)?,
            tilt_degrees: binary::read_u16(bytes, layout::ROOFS.at(n, TILT_DEGREES))?,
            roof_type: read_ref(bytes, layout::ROOFS.at(n, ROOF_TYPE), &names.roofs)?,
            area: binary::read_f32(bytes, layout::ROOFS.at(n, AREA))?,
            skylight_type: read_ref(bytes, layout::ROOFS.at(n, SKYLIGHT_TYPE), &names.windows)?,
            skylight_area: binary::read_f32(bytes, layout::ROOFS.at(n, SKYLIGHT_AREA))?,
        });
    }

    let floor_count =
        (binary::read_u16(bytes, layout::FLOOR_COUNT)? as usize).min(layout::FLOORS.count);
    let mut floors = Vec::with_capacity(floor_count);
    for n in 0..floor_count {
        use crate::layout::space::floor::*;
        floors.push(FloorSegment {
            area: binary::read_f32(bytes, layout::FLOORS.at(n, AREA))?,
            perimeter: binary::read_f32(bytes, layout::FLOORS.at(n, PERIMETER))?,
            edge_r: binary::read_f32(bytes, layout::FLOORS.at(n, EDGE_R))?,
        });
    }

    let mut entries: [InfiltrationEntry; 3] = Default::default();
    for (n, entry) in entries.iter_mut().enumerate() {
        use crate::layout::space::infiltration::*;
        entry.schedule = read_ref(bytes, layout::INFILTRATION.at(n, SCHEDULE), &names.schedules)?;
        entry.ach = binary::read_f32(bytes, layout::INFILTRATION.at(n, ACH))?;
    }

    Ok(Space {
        name,
        floor_area: binary::read_f32(bytes, layout::FLOOR_AREA)?,
        ceiling_height: binary::read_f32(bytes, layout::CEILING_HEIGHT)?,
        building_mass: binary::read_f32(bytes, layout::BUILDING_MASS)?,
        walls,
        roofs,
        floors,
        ceiling_partition: read_partition(bytes, 0)?,
        wall_partition: read_partition(bytes, 1)?,
        infiltration: Infiltration {
            method: read_code(bytes, layout::INFILTRATION_METHOD, &tables::INFILTRATION_METHOD)?,
            outdoor_air_unit: read_code(bytes, layout::OUTDOOR_AIR_UNIT, &tables::OUTDOOR_AIR_UNIT)?,
            outdoor_air: binary::read_f32(bytes, layout::OUTDOOR_AIR)?,
            entries,
        },
        people: PeopleGains {
            occupants: binary::read_f32(bytes, layout::PEOPLE_OCCUPANTS)?,
            activity: read_code(bytes, layout::PEOPLE_ACTIVITY, &tables::ACTIVITY_LEVEL)?,
            sensible: binary::read_f32(bytes, layout::PEOPLE_SENSIBLE)?,
            latent: binary::read_f32(bytes, layout::PEOPLE_LATENT)?,
            outdoor_air: binary::read_f32(bytes, layout::PEOPLE_OUTDOOR_AIR)?,
            outdoor_air_unit: read_code(
                bytes,
                layout::PEOPLE_OUTDOOR_AIR_UNIT,
                &tables::OUTDOOR_AIR_UNIT,
            )?,
            schedule: read_ref(bytes, layout::PEOPLE_SCHEDULE, &names.schedules)?,
        },
        lighting: LightingGains {
            wattage: binary::read_f32(bytes, layout::LIGHTING_WATTAGE)?,
            fixture: read_code(bytes, layout::LIGHTING_FIXTURE, &tables::LIGHT_FIXTURE)?,
            ballast: read_code(bytes, layout::LIGHTING_BALLAST, &tables::LIGHT_BALLAST)?,
            ballast_multiplier: binary::read_f32(bytes, layout::LIGHTING_BALLAST_MULTIPLIER)?,
            schedule: read_ref(bytes, layout::LIGHTING_SCHEDULE, &names.schedules)?,
        },
        equipment: EquipmentGains {
            sensible: binary::read_f32(bytes, layout::EQUIPMENT_SENSIBLE)?,
            latent: binary::read_f32(bytes, layout::EQUIPMENT_LATENT)?,
            schedule: read_ref(bytes, layout::EQUIPMENT_SCHEDULE, &names.schedules)?,
        },
        misc: MiscGains {
            sensible: binary::read_f32(bytes, layout::MISC_SENSIBLE)?,
            latent: binary::read_f32(bytes, layout::MISC_LATENT)?,
        },
        base: RecordBase(Some(bytes.to_vec())),
    })
}

/// Encode one space record.
pub(crate) fn encode(space: &Space, maps: &EncodeMaps) -> Result<Vec<u8>> {
    let context = format!("space {:?}", space.name);
    if space.walls.len() > layout::WALLS.count {
        return Err(Error::RecordEncode {
            context,
            reason: format!("{} exterior walls, record holds at most {}", space.walls.len(), layout::WALLS.count),
        });
    }
    if space.roofs.len() > layout::ROOFS.count {
        return Err(Error::RecordEncode {
            context,
            reason: format!("{} roofs, record holds at most {}", space.roofs.len(), layout::ROOFS.count),
        });
    }
    if space.floors.len() > layout::FLOORS.count {
        return Err(Error::RecordEncode {
            context,
            reason: format!("{} floor segments, record holds at most {}", space.floors.len(), layout::FLOORS.count),
        });
    }

    let mut bytes = base_buffer(&space.base, layout::RECORD_SIZE, &context)?;

    binary::write_str(&mut bytes, layout::NAME, layout::NAME_LEN, &space.name, &context)?;
    binary::write_f32(&mut bytes, layout::FLOOR_AREA, space.floor_area);
    binary::write_f32(&mut bytes, layout::CEILING_HEIGHT, space.ceiling_height);
    binary::write_f32(&mut bytes, layout::BUILDING_MASS, space.building_mass);
    binary::write_u16(&mut bytes, layout::WALL_COUNT, space.walls.len() as u16);
    binary::write_u16(&mut bytes, layout::ROOF_COUNT, space.roofs.len() as u16);
    binary::write_u16(&mut bytes, layout::FLOOR_COUNT, space.floors.len() as u16);

    for (n, wall) in space.walls.iter().enumerate() {
        use crate::layout::space::wall::*;
        write_code(&mut bytes, layout::WALLS.at(n, ORIENTATION), &wall.orientation, &tables::ORIENTATION)?;
        write_code(&mut bytes, layout::WALLS.at(n, TILT), &wall.tilt, &tables::WALL_TILT)?;
        write_ref(&mut bytes, layout::WALLS.at(n, WALL_TYPE), &wall.wall_type, &maps.walls, "wall_type")?;
        binary::write_f32(&mut bytes, layout::WALLS.at(n, GROSS_AREA), wall.gross_area);
        write_ref(&mut bytes, layout::WALLS.at(n, WINDOW_TYPE), &wall.window_type, &maps.windows, "window_type")?;
        binary::write_f32(&mut bytes, layout::WALLS.at(n, WINDOW_AREA), wall.window_area);
        binary::write_u16(&mut bytes, layout::WALLS.at(n, WINDOW_COUNT), wall.window_count);
        binary::write_f32(&mut bytes, layout::WALLS.at(n, OVERHANG_PROJECTION), wall.overhang_projection);
        binary::write_f32(&mut bytes, layout::WALLS.at(n, OVERHANG_OFFSET), wall.overhang_offset);
    }

    for (n, roof) in space.roofs.iter().enumerate() {
        use crate::layout::space::roof::*;
        write_code(&mut bytes, layout::ROOFS.at(n, ORIENTATION), &roof.orientation, &tables::ORIENTATION)?;
        binary::write_u16(&mut bytes, layout::ROOFS.at(n, TILT_DEGREES), roof.tilt_degrees);
        write_ref(&mut bytes, layout::ROOFS.at(n, ROOF_TYPE), &roof.roof_type, &maps.roofs, "roof_type")?;
        binary::write_f32(&mut bytes, layout::ROOFS.at(n, AREA), roof.area);
        write_ref(&mut bytes, layout::ROOFS.at(n, SKYLIGHT_TYPE), &roof.skylight_type, &maps.windows, "skylight_type")?;
        binary::write_f32(&mut bytes, layout::ROOFS.at(n, SKYLIGHT_AREA), roof.skylight_area);
    }

    for (n, floor) in space.floors.iter().enumerate() {
        use crate::layout::space::floor::*;
        binary::write_f32(&mut bytes, layout::FLOORS.at(n, AREA), floor.area);
        binary::write_f32(&mut bytes, layout::FLOORS.at(n, PERIMETER), floor.perimeter);
        binary::write_f32(&mut bytes, layout::FLOORS.at(n, EDGE_R), floor.edge_r);
    }

    write_partition(&mut bytes, 0, &space.ceiling_partition);
    write_partition(&mut bytes, 1, &space.wall_partition);

    write_code(&mut bytes, layout::INFILTRATION_METHOD, &space.infiltration.method, &tables::INFILTRATION_METHOD)?;
    write_code(&mut bytes, layout::OUTDOOR_AIR_UNIT, &space.infiltration.outdoor_air_unit, &tables::OUTDOOR_AIR_UNIT)?;
    binary::write_f32(&mut bytes, layout::OUTDOOR_AIR, space.infiltration.outdoor_air);
    for (n, entry) in space.infiltration.entries.iter().enumerate() {
        use crate::layout::space::infiltration::*;
        write_ref(&mut bytes, layout::INFILTRATION.at(n, SCHEDULE), &entry.schedule, &maps.schedules, "infiltration_sch")?;
        binary::write_f32(&mut bytes, layout::INFILTRATION.at(n, ACH), entry.ach);
    }

    binary::write_f32(&mut bytes, layout::PEOPLE_OCCUPANTS, space.people.occupants);
    write_code(&mut bytes, layout::PEOPLE_ACTIVITY, &space.people.activity, &tables::ACTIVITY_LEVEL)?;
    binary::write_f32(&mut bytes, layout::PEOPLE_SENSIBLE, space.people.sensible);
    binary::write_f32(&mut bytes, layout::PEOPLE_LATENT, space.people.latent);
    binary::write_f32(&mut bytes, layout::PEOPLE_OUTDOOR_AIR, space.people.outdoor_air);
    write_code(&mut bytes, layout::PEOPLE_OUTDOOR_AIR_UNIT, &space.people.outdoor_air_unit, &tables::OUTDOOR_AIR_UNIT)?;
    write_ref(&mut bytes, layout::PEOPLE_SCHEDULE, &space.people.schedule, &maps.schedules, "people_sch")?;

    binary::write_f32(&mut bytes, layout::LIGHTING_WATTAGE, space.lighting.wattage);
    write_code(&mut bytes, layout::LIGHTING_FIXTURE, &space.lighting.fixture, &tables::LIGHT_FIXTURE)?;
    write_code(&mut bytes, layout::LIGHTING_BALLAST, &space.lighting.ballast, &tables::LIGHT_BALLAST)?;
    binary::write_f32(&mut bytes, layout::LIGHTING_BALLAST_MULTIPLIER, space.lighting.ballast_multiplier);
    write_ref(&mut bytes, layout::LIGHTING_SCHEDULE, &space.lighting.schedule, &maps.schedules, "lighting_sch")?;

    binary::write_f32(&mut bytes, layout::EQUIPMENT_SENSIBLE, space.equipment.sensible);
    binary::write_f32(&mut bytes, layout::EQUIPMENT_LATENT, space.equipment.latent);
    binary::write_f32(&mut bytes, layout::MISC_SENSIBLE, space.misc.sensible);
    binary::write_f32(&mut bytes, layout::MISC_LATENT, space.misc.latent);
    write_ref(&mut bytes, layout::EQUIPMENT_SCHEDULE, &space.equipment.schedule, &maps.schedules, "equipment_sch")?;

    Ok(bytes)
}
