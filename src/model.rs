//! In-memory representation of an `.E3A` project.
//!
//! The model speaks names, not indices: a space references its assemblies,
//! window types and schedules by string, and the codec translates names to
//! 16-bit stream indices at exactly two boundaries (serialize and parse).
//! Collection order is significant — it defines the on-disk index of every
//! item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference from a space to a schedule, assembly or window type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Ref {
    /// No reference. Stored on disk as the 0xFFFF sentinel.
    #[default]
    None,
    /// Reference by name, resolved to an index on encode.
    Named(String),
    /// An index that did not resolve on decode. Re-encoded verbatim so an
    /// unmodified project still round-trips byte-exactly.
    Raw(u16),
}

impl Ref {
    /// Convenience constructor for a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Ref::Named(name.into())
    }
}

/// An enumerated field value.
///
/// Known codes decode to their table string; codes outside the closed table
/// are preserved as raw numbers and re-encoded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Code {
    Name(String),
    Raw(u16),
}

impl Code {
    pub fn name(name: impl Into<String>) -> Self {
        Code::Name(name.into())
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::Raw(0)
    }
}

/// Original on-disk bytes of a decoded record.
///
/// Encoding patches modelled fields over these bytes, which is what keeps
/// unmodelled regions byte-exact through a round trip. Compares equal to
/// everything so a freshly built project equals its decoded round trip, and
/// is skipped by serde at the adapter boundary.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RecordBase(#[serde(skip)] pub Option<Vec<u8>>);

impl PartialEq for RecordBase {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl fmt::Debug for RecordBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(bytes) => write!(f, "RecordBase({} bytes)", bytes.len()),
            None => write!(f, "RecordBase(none)"),
        }
    }
}

/// A named hourly/annual profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub workday_type: u16,
    /// 8 day-type profiles of 24 hourly fractions each. Stored on disk as
    /// u16 hundredths; any on-disk value round-trips exactly through f64.
    pub profiles: [[f64; 24]; 8],
    /// Calendar assignment: 12 months x 9 day slots (design day, Mon..Sun,
    /// holiday), each cell a day-type code selecting one profile row.
    pub calendar: [[u16; 9]; 12],
    pub base: RecordBase,
}

impl Schedule {
    /// A schedule with the given weekday-hours profile applied to profile
    /// row 1 and the whole calendar assigned to it.
    pub fn with_weekday_profile(name: impl Into<String>, hours: [f64; 24]) -> Self {
        let mut schedule = Schedule {
            name: name.into(),
            ..Default::default()
        };
        schedule.profiles[1] = hours;
        schedule.calendar = [[1; 9]; 12];
        schedule
    }
}

/// One layer of a wall or roof construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub thickness: f32,
    pub r_value: f32,
    pub density: f32,
    pub specific_heat: f32,
}

/// A named multi-layer wall or roof construction. Both kinds share the same
/// record layout; which stream a list is written to decides the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    pub u_value: f32,
    pub surface_mass: f32,
    pub thickness: f32,
    pub layers: Vec<Layer>,
    pub base: RecordBase,
}

/// A named glazing type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowType {
    pub name: String,
    pub u_value: f32,
    pub shgc: f32,
    pub height: f32,
    pub width: f32,
    pub base: RecordBase,
}

/// One exterior wall of a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExteriorWall {
    pub orientation: Code,
    pub tilt: Code,
    pub wall_type: Ref,
    pub gross_area: f32,
    pub window_type: Ref,
    pub window_area: f32,
    pub window_count: u16,
    pub overhang_projection: f32,
    pub overhang_offset: f32,
}

/// One roof of a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoofSegment {
    pub orientation: Code,
    pub tilt_degrees: u16,
    pub roof_type: Ref,
    pub area: f32,
    pub skylight_type: Ref,
    pub skylight_area: f32,
}

/// One floor segment of a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorSegment {
    pub area: f32,
    pub perimeter: f32,
    pub edge_r: f32,
}

/// A partition block (ceiling-to-ceiling or wall-to-wall).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub u_value: f32,
    pub area: f32,
    pub adjacent_temp: f32,
}

/// One (schedule, ACH) infiltration pair. The third pair is zero in every
/// observed file but is carried faithfully either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfiltrationEntry {
    pub schedule: Ref,
    pub ach: f32,
}

/// Infiltration block of a space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infiltration {
    pub method: Code,
    pub outdoor_air_unit: Code,
    pub outdoor_air: f32,
    pub entries: [InfiltrationEntry; 3],
}

/// People internal-gains block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleGains {
    pub occupants: f32,
    pub activity: Code,
    pub sensible: f32,
    pub latent: f32,
    pub outdoor_air: f32,
    pub outdoor_air_unit: Code,
    pub schedule: Ref,
}

/// Lighting internal-gains block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightingGains {
    pub wattage: f32,
    pub fixture: Code,
    pub ballast: Code,
    pub ballast_multiplier: f32,
    pub schedule: Ref,
}

/// Equipment internal-gains block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentGains {
    pub sensible: f32,
    pub latent: f32,
    pub schedule: Ref,
}

/// Miscellaneous internal-gains block. The format stores magnitudes only;
/// there is no schedule slot for these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscGains {
    pub sensible: f32,
    pub latent: f32,
}

/// A thermal zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,
    pub floor_area: f32,
    pub ceiling_height: f32,
    pub building_mass: f32,
    /// Up to 8 exterior walls.
    pub walls: Vec<ExteriorWall>,
    /// Up to 4 roofs.
    pub roofs: Vec<RoofSegment>,
    /// Up to 4 floor segments.
    pub floors: Vec<FloorSegment>,
    pub ceiling_partition: Partition,
    pub wall_partition: Partition,
    pub infiltration: Infiltration,
    pub people: PeopleGains,
    pub lighting: LightingGains,
    pub equipment: EquipmentGains,
    pub misc: MiscGains,
    pub base: RecordBase,
}

/// A complete project: the four type collections plus the spaces that
/// reference them. The project owns its collections exclusively; spaces hold
/// names only.
///
/// The spaces list never contains the Default Space — the encoder always
/// synthesizes stream slot 0 and the decoder never surfaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub schedules: Vec<Schedule>,
    pub walls: Vec<Assembly>,
    pub roofs: Vec<Assembly>,
    pub windows: Vec<WindowType>,
    pub spaces: Vec<Space>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_base_never_breaks_equality() {
        let mut a = WindowType {
            name: "G1".into(),
            u_value: 1.8,
            ..Default::default()
        };
        let b = a.clone();
        a.base = RecordBase(Some(vec![0u8; 126]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_weekday_profile_builder() {
        let mut hours = [0.0; 24];
        hours[8..17].fill(1.0);
        let schedule = Schedule::with_weekday_profile("Sch_Occ", hours);
        assert_eq!(schedule.profiles[1][8], 1.0);
        assert_eq!(schedule.profiles[0][8], 0.0);
        assert!(schedule.calendar.iter().flatten().all(|&c| c == 1));
    }
}
