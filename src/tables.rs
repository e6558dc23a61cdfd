//! Closed lookup tables between human-facing strings and the 16-bit codes
//! stored in records.
//!
//! The tables are deliberately data, not logic: each is a single slice
//! consulted in both directions, so the mapping can be audited against the
//! format documentation in one place. Lookups are case-sensitive; the string
//! side is trimmed before comparison. An unknown string is a hard error —
//! never silently mapped to zero.

use crate::error::{Error, Result};

/// One closed string ↔ code mapping, named after the field it governs.
#[derive(Debug)]
pub struct EnumTable {
    field: &'static str,
    entries: &'static [(u16, &'static str)],
}

impl EnumTable {
    /// Resolve a human-facing string to its on-disk code.
    pub fn code(&self, value: &str) -> Result<u16> {
        let value = value.trim();
        self.entries
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(code, _)| *code)
            .ok_or_else(|| Error::UnknownEnum {
                field: self.field,
                value: value.to_string(),
            })
    }

    /// Resolve an on-disk code to its string, if the code is known.
    pub fn name(&self, code: u16) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    /// The field this table governs, for diagnostics.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// Compass orientation of an exterior wall or roof.
pub static ORIENTATION: EnumTable = EnumTable {
    field: "orientation",
    entries: &[
        (0, "N"),
        (1, "NE"),
        (2, "E"),
        (3, "SE"),
        (4, "S"),
        (5, "SW"),
        (6, "W"),
        (7, "NW"),
    ],
};

/// Wall tilt category.
pub static WALL_TILT: EnumTable = EnumTable {
    field: "wall_tilt",
    entries: &[(0, "Vertical"), (1, "Sloped"), (2, "Horizontal")],
};

/// Infiltration specification method.
pub static INFILTRATION_METHOD: EnumTable = EnumTable {
    field: "infiltration_method",
    entries: &[(0, "ACH"), (1, "L/s·m²"), (2, "L/s")],
};

/// People activity level.
pub static ACTIVITY_LEVEL: EnumTable = EnumTable {
    field: "activity_level",
    entries: &[
        (0, "Seated at rest"),
        (1, "Office work"),
        (2, "Light work"),
        (3, "Heavy work"),
        (4, "Dancing"),
        (5, "Athletics"),
    ],
};

/// Light fixture type.
pub static LIGHT_FIXTURE: EnumTable = EnumTable {
    field: "light_fixture",
    entries: &[
        (0, "Recessed unvented"),
        (1, "Recessed vented"),
        (2, "Free-hanging"),
    ],
};

/// Light ballast type.
pub static LIGHT_BALLAST: EnumTable = EnumTable {
    field: "light_ballast",
    entries: &[(0, "Conventional"), (1, "Electronic"), (2, "None")],
};

/// Unit for the outdoor-air magnitude.
pub static OUTDOOR_AIR_UNIT: EnumTable = EnumTable {
    field: "outdoor_air_unit",
    entries: &[(0, "L/s/person"), (1, "L/s"), (2, "ACH")],
};
