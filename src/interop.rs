//! Thin shims for the spreadsheet importer and extractor.
//!
//! The importer hands over loosely-typed rows (strings and f64s, the natural
//! output of a sheet reader); these adapters coerce them into model types and
//! flatten model types back out. No I/O, no sheet layout knowledge — that all
//! belongs to the external collaborators.

use crate::error::{Error, Result};
use crate::model::{Code, Ref, Schedule, Space, WindowType};
use serde::{Deserialize, Serialize};

/// Interpret a spreadsheet cell as a reference: blank means "no reference".
pub fn ref_from_cell(cell: &str) -> Ref {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        Ref::None
    } else {
        Ref::Named(trimmed.to_string())
    }
}

/// Flatten a reference back into a spreadsheet cell.
pub fn ref_to_cell(reference: &Ref) -> String {
    match reference {
        Ref::None => String::new(),
        Ref::Named(name) => name.clone(),
        Ref::Raw(index) => format!("#{}", index),
    }
}

/// Interpret a spreadsheet cell as an enumerated value. The string is kept
/// as-is; table lookup (and the hard error for unknown strings) happens on
/// encode.
pub fn code_from_cell(cell: &str) -> Code {
    Code::Name(cell.trim().to_string())
}

/// A schedule as the importer sheet carries it: one weekday profile and a
/// uniform calendar code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub name: String,
    pub workday_type: u16,
    /// 24 hourly fractions for the weekday profile.
    pub weekday_hours: Vec<f64>,
    /// Day-type code assigned to every calendar cell.
    pub calendar_code: u16,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = Error;

    fn try_from(row: ScheduleRow) -> Result<Schedule> {
        let hours: [f64; 24] = row.weekday_hours.as_slice().try_into().map_err(|_| {
            Error::RecordEncode {
                context: format!("schedule {:?}", row.name),
                reason: format!("{} hourly values, expected 24", row.weekday_hours.len()),
            }
        })?;
        let mut schedule = Schedule::with_weekday_profile(row.name, hours);
        schedule.workday_type = row.workday_type;
        schedule.calendar = [[row.calendar_code; 9]; 12];
        Ok(schedule)
    }
}

/// A glazing type as the importer sheet carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRow {
    pub name: String,
    pub u_value: f64,
    pub shgc: f64,
    pub height: f64,
    pub width: f64,
}

impl From<WindowRow> for WindowType {
    fn from(row: WindowRow) -> WindowType {
        WindowType {
            name: row.name,
            u_value: row.u_value as f32,
            shgc: row.shgc as f32,
            height: row.height as f32,
            width: row.width as f32,
            ..Default::default()
        }
    }
}

/// Flatten the scalar part of a space for the extractor. The geometry
/// sub-blocks go out through their own sheet sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceSummaryRow {
    pub name: String,
    pub floor_area: f64,
    pub ceiling_height: f64,
    pub people_schedule: String,
    pub lighting_schedule: String,
    pub equipment_schedule: String,
    pub wall_count: usize,
    pub roof_count: usize,
}

impl From<&Space> for SpaceSummaryRow {
    fn from(space: &Space) -> SpaceSummaryRow {
        SpaceSummaryRow {
            name: space.name.clone(),
            floor_area: space.floor_area as f64,
            ceiling_height: space.ceiling_height as f64,
            people_schedule: ref_to_cell(&space.people.schedule),
            lighting_schedule: ref_to_cell(&space.lighting.schedule),
            equipment_schedule: ref_to_cell(&space.equipment.schedule),
            wall_count: space.walls.len(),
            roof_count: space.roofs.len(),
        }
    }
}
