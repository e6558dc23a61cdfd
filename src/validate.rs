//! Integrity validation and in-place repair.
//!
//! Three defect classes are checked, the ones the host tool actually rejects
//! files over:
//!
//! 1. schedule calendar slots outside the legal day-type set,
//! 2. nonzero schedule references in the Default Space record,
//! 3. dangling schedule references in ordinary spaces.
//!
//! Classes 1 and 2 have a safe mechanical repair; class 3 is report-only
//! because no fallback schedule can be chosen automatically. File-level
//! operation always writes a `.backup` sibling before the first mutation and
//! replaces the original atomically (temp path, then rename).

use crate::binary;
use crate::container::{Container, SCHEDULE_STREAM, SPACE_STREAM};
use crate::error::Result;
use crate::layout::{REF_UNSET, schedule, space};
use crate::records;
use std::fmt;
use std::path::Path;

/// One detected defect.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Stream the defect lives in.
    pub stream: &'static str,
    /// Record index within the stream.
    pub record: usize,
    /// Absolute byte offset of the bad field within the record.
    pub offset: usize,
    /// The offending 16-bit value.
    pub value: u16,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record {} offset {}: value {}",
            self.stream, self.record, self.offset, self.value
        )
    }
}

/// Validation findings partitioned by defect class.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Calendar slots outside the legal day-type set. Repairable.
    pub calendar: Vec<Finding>,
    /// Nonzero schedule references in the Default Space. Repairable.
    pub default_space: Vec<Finding>,
    /// Dangling schedule references in ordinary spaces. Report-only.
    pub dangling: Vec<Finding>,
    /// Whether repairs were applied to the checked container.
    pub repaired: bool,
}

impl Report {
    /// True when no defect of any class was found.
    pub fn is_clean(&self) -> bool {
        self.calendar.is_empty() && self.default_space.is_empty() && self.dangling.is_empty()
    }

    /// True when every finding belongs to a repairable class.
    pub fn is_repairable(&self) -> bool {
        self.dangling.is_empty()
    }

    /// Total finding count across all classes.
    pub fn total(&self) -> usize {
        self.calendar.len() + self.default_space.len() + self.dangling.len()
    }

    fn write_class(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        findings: &[Finding],
    ) -> fmt::Result {
        const CAP: usize = 10;
        writeln!(f, "{}: {}", label, findings.len())?;
        for finding in findings.iter().take(CAP) {
            writeln!(f, "  {}", finding)?;
        }
        if findings.len() > CAP {
            writeln!(f, "  ... and {} more", findings.len() - CAP)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "clean: no integrity defects found");
        }
        Self::write_class(f, "schedule calendar corruption", &self.calendar)?;
        Self::write_class(f, "default space contamination", &self.default_space)?;
        Self::write_class(f, "dangling schedule references", &self.dangling)?;
        Ok(())
    }
}

fn scan_calendars(stream: &[u8], report: &mut Report, repair: Option<&mut Vec<u8>>) -> Result<()> {
    let mut patched = repair;
    for (index, record) in
        records::split(stream, schedule::RECORD_SIZE, SCHEDULE_STREAM)?.enumerate()
    {
        let record_base = index * schedule::RECORD_SIZE;
        for offset in (schedule::CALENDAR_START..schedule::CALENDAR_END).step_by(2) {
            let value = binary::read_u16(record, offset)?;
            if value > schedule::MAX_DAY_TYPE {
                report.calendar.push(Finding {
                    stream: SCHEDULE_STREAM,
                    record: index,
                    offset,
                    value,
                });
                if let Some(bytes) = patched.as_deref_mut() {
                    binary::write_u16(bytes, record_base + offset, schedule::REPAIR_DAY_TYPE);
                    tracing::info!(record = index, offset, value, "repaired calendar slot");
                }
            }
        }
    }
    Ok(())
}

fn scan_spaces(
    stream: &[u8],
    schedule_count: usize,
    report: &mut Report,
    repair: Option<&mut Vec<u8>>,
) -> Result<()> {
    let mut patched = repair;
    for (index, record) in records::split(stream, space::RECORD_SIZE, SPACE_STREAM)?.enumerate() {
        let record_base = index * space::RECORD_SIZE;
        for &offset in &space::SCHEDULE_REFS {
            let value = binary::read_u16(record, offset)?;
            if index == 0 {
                // Default Space sentinel: every schedule reference must be zero.
                if value != 0 {
                    report.default_space.push(Finding {
                        stream: SPACE_STREAM,
                        record: index,
                        offset,
                        value,
                    });
                    if let Some(bytes) = patched.as_deref_mut() {
                        binary::write_u16(bytes, record_base + offset, 0);
                        tracing::info!(offset, value, "zeroed default space schedule reference");
                    }
                }
            } else if value != 0 && value != REF_UNSET && usize::from(value) >= schedule_count {
                // No safe automated repair for these.
                report.dangling.push(Finding {
                    stream: SPACE_STREAM,
                    record: index,
                    offset,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Read-only check of a container.
pub fn check(container: &Container) -> Result<Report> {
    let mut report = Report::default();
    let mut schedule_count = 0;
    if let Some(stream) = container.get(SCHEDULE_STREAM) {
        schedule_count = stream.len() / schedule::RECORD_SIZE;
        scan_calendars(stream, &mut report, None)?;
    }
    if let Some(stream) = container.get(SPACE_STREAM) {
        scan_spaces(stream, schedule_count, &mut report, None)?;
    }
    Ok(report)
}

/// Check a container and repair defect classes 1 and 2 in place.
///
/// Dangling references are reported but never touched. The returned report's
/// `repaired` flag says whether any stream was rewritten.
pub fn fix(container: &mut Container) -> Result<Report> {
    let mut report = Report::default();
    let mut schedule_count = 0;

    if let Some(stream) = container.get(SCHEDULE_STREAM) {
        schedule_count = stream.len() / schedule::RECORD_SIZE;
        let mut patched = stream.to_vec();
        scan_calendars(stream, &mut report, Some(&mut patched))?;
        if !report.calendar.is_empty() {
            container.replace(SCHEDULE_STREAM, patched);
        }
    }
    if let Some(stream) = container.get(SPACE_STREAM) {
        let mut patched = stream.to_vec();
        scan_spaces(stream, schedule_count, &mut report, Some(&mut patched))?;
        if !report.default_space.is_empty() {
            container.replace(SPACE_STREAM, patched);
        }
    }

    report.repaired = !report.calendar.is_empty() || !report.default_space.is_empty();
    Ok(report)
}

/// Validate a file on disk; with `apply_fix`, repair it in place.
///
/// Before the first mutation the original is copied to a `.backup` sibling.
/// The repaired archive is written to a sibling temp path and renamed over
/// the original, so either the backup+write pair completes or the original is
/// untouched. Post-repair cleanliness is what the exit status reflects:
/// dangling references keep the report dirty because they cannot be fixed.
pub fn validate_file(path: impl AsRef<Path>, apply_fix: bool) -> Result<Report> {
    let path = path.as_ref();
    let container = Container::open(path)?;

    if !apply_fix {
        return check(&container);
    }

    let mut container = container;
    let report = fix(&mut container)?;
    if report.repaired {
        let backup = backup_path(path);
        std::fs::copy(path, &backup)?;
        container.write_to_path(path)?;
        tracing::info!(
            path = %path.display(),
            backup = %backup.display(),
            repaired = report.calendar.len() + report.default_space.len(),
            "repairs written"
        );
    }
    Ok(report)
}

/// The `.backup` sibling for a given file.
pub fn backup_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".backup");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::schedule as sched_layout;

    fn container_with(schedules: Vec<u8>, spaces: Vec<u8>) -> Container {
        let mut container = Container::default();
        container.replace(SCHEDULE_STREAM, schedules);
        container.replace(SPACE_STREAM, spaces);
        container
    }

    #[test]
    fn test_clean_container() {
        let container = container_with(
            vec![0u8; sched_layout::RECORD_SIZE],
            vec![0u8; space::RECORD_SIZE * 2],
        );
        let report = check(&container).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_calendar_corruption_detected_and_repaired() {
        let mut schedules = vec![0u8; sched_layout::RECORD_SIZE];
        binary::write_u16(&mut schedules, 576, 9);
        let mut container = container_with(schedules, vec![0u8; space::RECORD_SIZE]);

        let report = check(&container).unwrap();
        assert_eq!(report.calendar.len(), 1);
        assert_eq!(report.calendar[0].offset, 576);
        assert_eq!(report.calendar[0].value, 9);

        let report = fix(&mut container).unwrap();
        assert!(report.repaired);
        let repaired = container.get(SCHEDULE_STREAM).unwrap();
        assert_eq!(binary::read_u16(repaired, 576).unwrap(), 1);

        // Idempotence: a second run finds nothing and rewrites nothing.
        let second = fix(&mut container).unwrap();
        assert!(second.is_clean());
        assert!(!second.repaired);
    }

    #[test]
    fn test_default_space_contamination() {
        let mut spaces = vec![0u8; space::RECORD_SIZE * 2];
        binary::write_u16(&mut spaces, 594, 3);
        let mut container = container_with(vec![], spaces);

        let report = check(&container).unwrap();
        assert_eq!(report.default_space.len(), 1);

        fix(&mut container).unwrap();
        let repaired = container.get(SPACE_STREAM).unwrap();
        assert_eq!(binary::read_u16(repaired, 594).unwrap(), 0);
        assert!(check(&container).unwrap().is_clean());
    }

    #[test]
    fn test_dangling_reference_reported_not_repaired() {
        // 10 schedules, space 1 references schedule 99.
        let schedules = vec![0u8; sched_layout::RECORD_SIZE * 10];
        let mut spaces = vec![0u8; space::RECORD_SIZE * 2];
        binary::write_u16(&mut spaces, space::RECORD_SIZE + 594, 99);
        let original_spaces = spaces.clone();
        let mut container = container_with(schedules, spaces);

        let report = fix(&mut container).unwrap();
        assert_eq!(report.dangling.len(), 1);
        assert!(!report.is_clean());
        assert!(!report.is_repairable());
        assert!(!report.repaired);
        assert_eq!(container.get(SPACE_STREAM).unwrap(), &original_spaces[..]);
    }

    #[test]
    fn test_unset_sentinel_is_not_dangling() {
        let schedules = vec![0u8; sched_layout::RECORD_SIZE];
        let mut spaces = vec![0u8; space::RECORD_SIZE * 2];
        binary::write_u16(&mut spaces, space::RECORD_SIZE + 594, REF_UNSET);
        let container = container_with(schedules, spaces);
        assert!(check(&container).unwrap().is_clean());
    }

    #[test]
    fn test_report_display_caps_items() {
        let mut report = Report::default();
        for i in 0..14 {
            report.calendar.push(Finding {
                stream: SCHEDULE_STREAM,
                record: i,
                offset: 576,
                value: 9,
            });
        }
        let text = report.to_string();
        assert!(text.contains("schedule calendar corruption: 14"));
        assert!(text.contains("... and 4 more"));
    }
}
