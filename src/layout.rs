//! Declarative byte layouts for the five record kinds.
//!
//! The record codecs consult these tables instead of hard-coding offsets, so
//! the implementation can be audited against the format notes field by field.
//! Offsets were recovered from a captured template and verified by
//! round-tripping a library of reference files. All offsets are absolute
//! within a single record.

/// A repeated fixed-stride sub-block inside a record.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub base: usize,
    pub stride: usize,
    pub count: usize,
}

impl Block {
    /// Absolute offset of slot `n`, plus a field offset within the slot.
    #[inline]
    pub const fn at(&self, n: usize, field: usize) -> usize {
        self.base + n * self.stride + field
    }
}

/// Space record: one thermal zone. 682 bytes.
pub mod space {
    use super::Block;

    pub const RECORD_SIZE: usize = 682;

    pub const NAME: usize = 0;
    pub const NAME_LEN: usize = 24;
    pub const FLOOR_AREA: usize = 24;
    pub const CEILING_HEIGHT: usize = 28;
    pub const BUILDING_MASS: usize = 32;
    pub const WALL_COUNT: usize = 36;
    pub const ROOF_COUNT: usize = 38;

    /// Up to 8 exterior walls.
    pub const WALLS: Block = Block { base: 40, stride: 28, count: 8 };
    /// Field offsets within one wall slot.
    pub mod wall {
        pub const ORIENTATION: usize = 0;
        pub const TILT: usize = 2;
        pub const WALL_TYPE: usize = 4;
        pub const GROSS_AREA: usize = 6;
        pub const WINDOW_TYPE: usize = 10;
        pub const WINDOW_AREA: usize = 12;
        pub const WINDOW_COUNT: usize = 16;
        pub const OVERHANG_PROJECTION: usize = 18;
        pub const OVERHANG_OFFSET: usize = 22;
    }

    /// Up to 4 roofs.
    pub const ROOFS: Block = Block { base: 264, stride: 18, count: 4 };
    pub mod roof {
        pub const ORIENTATION: usize = 0;
        pub const TILT_DEGREES: usize = 2;
        pub const ROOF_TYPE: usize = 4;
        pub const AREA: usize = 6;
        pub const SKYLIGHT_TYPE: usize = 10;
        pub const SKYLIGHT_AREA: usize = 12;
    }

    /// Up to 4 floor segments.
    pub const FLOORS: Block = Block { base: 336, stride: 16, count: 4 };
    pub mod floor {
        pub const AREA: usize = 0;
        pub const PERIMETER: usize = 4;
        pub const EDGE_R: usize = 8;
    }

    /// Ceiling-to-ceiling and wall-to-wall partition blocks.
    pub const PARTITIONS: Block = Block { base: 400, stride: 14, count: 2 };
    pub mod partition {
        pub const U_VALUE: usize = 0;
        pub const AREA: usize = 4;
        pub const ADJACENT_TEMP: usize = 8;
    }

    pub const INFILTRATION_METHOD: usize = 544;
    pub const OUTDOOR_AIR_UNIT: usize = 546;
    pub const OUTDOOR_AIR: usize = 548;
    pub const FLOOR_COUNT: usize = 552;

    /// Three (schedule index, ACH value) pairs.
    pub const INFILTRATION: Block = Block { base: 554, stride: 6, count: 3 };
    pub mod infiltration {
        pub const SCHEDULE: usize = 0;
        pub const ACH: usize = 2;
    }

    pub const PEOPLE_OCCUPANTS: usize = 572;
    pub const PEOPLE_ACTIVITY: usize = 576;
    pub const PEOPLE_SENSIBLE: usize = 578;
    pub const PEOPLE_LATENT: usize = 582;
    pub const PEOPLE_OUTDOOR_AIR: usize = 586;
    pub const PEOPLE_OUTDOOR_AIR_UNIT: usize = 590;
    pub const PEOPLE_SCHEDULE: usize = 594;

    pub const LIGHTING_WATTAGE: usize = 596;
    pub const LIGHTING_FIXTURE: usize = 600;
    pub const LIGHTING_BALLAST: usize = 602;
    pub const LIGHTING_BALLAST_MULTIPLIER: usize = 604;
    pub const LIGHTING_SCHEDULE: usize = 616;

    pub const EQUIPMENT_SENSIBLE: usize = 618;
    pub const EQUIPMENT_LATENT: usize = 622;
    pub const MISC_SENSIBLE: usize = 626;
    pub const MISC_LATENT: usize = 630;
    pub const EQUIPMENT_SCHEDULE: usize = 660;

    /// Every schedule-reference offset in a space record, in layout order:
    /// the three infiltration slots, people, lighting, equipment. The Default
    /// Space at slot 0 must hold zero at all six; the dangling-reference scan
    /// covers the same six in every other space.
    pub const SCHEDULE_REFS: [usize; 6] = [554, 560, 566, 594, 616, 660];
}

/// Schedule record: hourly profiles plus annual calendar assignment. 792 bytes.
pub mod schedule {
    use super::Block;

    pub const RECORD_SIZE: usize = 792;

    pub const NAME: usize = 0;
    pub const NAME_LEN: usize = 40;
    pub const WORKDAY_TYPE: usize = 40;

    /// 8 day-type profiles of 24 hourly values each, stored as u16 hundredths
    /// of a fraction.
    pub const PROFILES: Block = Block { base: 192, stride: 48, count: 8 };
    pub const HOURS: usize = 24;

    /// Calendar assignment: for each month, a day-type code for each of the
    /// nine day slots (design day, Mon..Sun, holiday). Covers every day of
    /// the year. This region is exactly bytes 576..792.
    pub const CALENDAR: Block = Block { base: 576, stride: 18, count: 12 };
    pub const DAY_SLOTS: usize = 9;
    pub const CALENDAR_START: usize = 576;
    pub const CALENDAR_END: usize = 792;

    /// Highest legal day-type code. Codes above this are corruption, not
    /// data; the repair rule rewrites them to 1 (weekday).
    pub const MAX_DAY_TYPE: u16 = 8;
    pub const REPAIR_DAY_TYPE: u16 = 1;
}

/// Wall and roof assembly record: a multi-layer construction. 3187 bytes.
/// Both assembly kinds share the layout; only the stream they live in
/// differs.
pub mod assembly {
    use super::Block;

    pub const RECORD_SIZE: usize = 3187;

    pub const NAME: usize = 0;
    pub const NAME_LEN: usize = 30;
    pub const LAYER_COUNT: usize = 30;
    pub const U_VALUE: usize = 32;
    pub const SURFACE_MASS: usize = 36;
    pub const THICKNESS: usize = 40;

    /// Fixed-size layer table.
    pub const LAYERS: Block = Block { base: 64, stride: 36, count: 24 };
    pub mod layer {
        pub const NAME: usize = 0;
        pub const NAME_LEN: usize = 20;
        pub const THICKNESS: usize = 20;
        pub const R_VALUE: usize = 24;
        pub const DENSITY: usize = 28;
        pub const SPECIFIC_HEAT: usize = 32;
    }
}

/// Window/glazing record. 126 bytes.
pub mod window {
    pub const RECORD_SIZE: usize = 126;

    pub const NAME: usize = 0;
    pub const NAME_LEN: usize = 24;
    pub const U_VALUE: usize = 24;
    pub const SHGC: usize = 28;
    pub const HEIGHT: usize = 32;
    pub const WIDTH: usize = 36;
}

/// Index value meaning "no reference".
pub const REF_UNSET: u16 = 0xFFFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_stay_inside_records() {
        assert!(space::WALLS.at(space::WALLS.count - 1, space::WALLS.stride) <= space::ROOFS.base);
        assert!(space::ROOFS.at(space::ROOFS.count - 1, space::ROOFS.stride) <= space::FLOORS.base);
        assert!(
            schedule::CALENDAR.at(schedule::CALENDAR.count - 1, schedule::CALENDAR.stride)
                == schedule::RECORD_SIZE
        );
        assert!(
            assembly::LAYERS.at(assembly::LAYERS.count - 1, assembly::LAYERS.stride)
                <= assembly::RECORD_SIZE
        );
    }

    #[test]
    fn test_mandated_schedule_offsets() {
        // These six offsets are fixed by the format and must never move.
        assert_eq!(space::SCHEDULE_REFS, [554, 560, 566, 594, 616, 660]);
        assert_eq!(space::INFILTRATION.at(0, space::infiltration::SCHEDULE), 554);
        assert_eq!(space::INFILTRATION.at(1, space::infiltration::SCHEDULE), 560);
        assert_eq!(space::INFILTRATION.at(2, space::infiltration::SCHEDULE), 566);
        assert_eq!(space::PEOPLE_SCHEDULE, 594);
        assert_eq!(space::LIGHTING_SCHEDULE, 616);
        assert_eq!(space::EQUIPMENT_SCHEDULE, 660);
    }

    #[test]
    fn test_calendar_region() {
        assert_eq!(schedule::CALENDAR_START, 576);
        assert_eq!(schedule::CALENDAR_END, schedule::RECORD_SIZE);
        assert_eq!(
            schedule::CALENDAR.count * schedule::DAY_SLOTS * 2,
            schedule::CALENDAR_END - schedule::CALENDAR_START
        );
    }
}
