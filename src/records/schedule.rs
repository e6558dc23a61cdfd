//! Schedule record codec (792 bytes).
//!
//! A schedule is a 40-byte name, a workday-type code, 8 day-type profiles of
//! 24 hourly fractions (stored as u16 hundredths), and the calendar
//! assignment table: one day-type code per (month, day slot) cell covering
//! every day of the year. The calendar region is exactly bytes 576..792.

use super::base_buffer;
use crate::binary;
use crate::error::{Error, Result};
use crate::layout::schedule as layout;
use crate::model::{RecordBase, Schedule};

/// Decode one schedule record.
pub fn decode(bytes: &[u8]) -> Result<Schedule> {
    let name = binary::read_str(bytes, layout::NAME, layout::NAME_LEN)?;
    let workday_type = binary::read_u16(bytes, layout::WORKDAY_TYPE)?;

    let mut profiles = [[0.0f64; 24]; 8];
    for (p, profile) in profiles.iter_mut().enumerate() {
        for (h, hour) in profile.iter_mut().enumerate() {
            let raw = binary::read_u16(bytes, layout::PROFILES.at(p, h * 2))?;
            *hour = raw as f64 / 100.0;
        }
    }

    let mut calendar = [[0u16; 9]; 12];
    for (m, month) in calendar.iter_mut().enumerate() {
        for (s, slot) in month.iter_mut().enumerate() {
            *slot = binary::read_u16(bytes, layout::CALENDAR.at(m, s * 2))?;
        }
    }

    Ok(Schedule {
        name,
        workday_type,
        profiles,
        calendar,
        base: RecordBase(Some(bytes.to_vec())),
    })
}

/// Encode one schedule record.
pub fn encode(schedule: &Schedule) -> Result<Vec<u8>> {
    let context = format!("schedule {:?}", schedule.name);
    let mut bytes = base_buffer(&schedule.base, layout::RECORD_SIZE, &context)?;

    binary::write_str(&mut bytes, layout::NAME, layout::NAME_LEN, &schedule.name, &context)?;
    binary::write_u16(&mut bytes, layout::WORKDAY_TYPE, schedule.workday_type);

    for (p, profile) in schedule.profiles.iter().enumerate() {
        for (h, &hour) in profile.iter().enumerate() {
            let scaled = (hour * 100.0).round();
            if !(0.0..=u16::MAX as f64).contains(&scaled) {
                return Err(Error::RecordEncode {
                    context: context.clone(),
                    reason: format!("hourly value {} at profile {} hour {} out of range", hour, p, h),
                });
            }
            binary::write_u16(&mut bytes, layout::PROFILES.at(p, h * 2), scaled as u16);
        }
    }

    for (m, month) in schedule.calendar.iter().enumerate() {
        for (s, &code) in month.iter().enumerate() {
            if code > layout::MAX_DAY_TYPE {
                tracing::warn!(
                    schedule = %schedule.name,
                    month = m,
                    slot = s,
                    code,
                    "encoding calendar code above the legal day-type set"
                );
            }
            binary::write_u16(&mut bytes, layout::CALENDAR.at(m, s * 2), code);
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schedule {
        let mut hours = [0.0; 24];
        hours[8..17].fill(1.0);
        let mut schedule = Schedule::with_weekday_profile("Sch_Occ", hours);
        schedule.profiles[0][12] = 0.5;
        schedule.calendar[6][8] = 5;
        schedule
    }

    #[test]
    fn test_round_trip() {
        let schedule = sample();
        let bytes = encode(&schedule).unwrap();
        assert_eq!(bytes.len(), layout::RECORD_SIZE);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, schedule);
        // And the re-encode is byte-identical.
        assert_eq!(encode(&decoded).unwrap(), bytes);
    }

    #[test]
    fn test_calendar_lands_in_mandated_region() {
        let mut schedule = sample();
        schedule.calendar = [[3; 9]; 12];
        let bytes = encode(&schedule).unwrap();
        for offset in (layout::CALENDAR_START..layout::CALENDAR_END).step_by(2) {
            assert_eq!(binary::read_u16(&bytes, offset).unwrap(), 3);
        }
    }

    #[test]
    fn test_fractions_survive_hundredths_storage() {
        let mut schedule = sample();
        schedule.profiles[2][0] = 0.33;
        let decoded = decode(&encode(&schedule).unwrap()).unwrap();
        assert_eq!(decoded.profiles[2][0], 0.33);
    }

    #[test]
    fn test_name_too_long_is_fatal() {
        let mut schedule = sample();
        schedule.name = "x".repeat(41);
        assert!(encode(&schedule).is_err());
    }

    #[test]
    fn test_negative_hour_is_fatal() {
        let mut schedule = sample();
        schedule.profiles[0][0] = -0.1;
        assert!(encode(&schedule).is_err());
    }
}
