//! Project ↔ container translation.
//!
//! Encoding never builds an `.E3A` from scratch: it clones a known-good
//! template container, serializes the five understood streams from the
//! project, substitutes them, and leaves every other entry untouched. The
//! host tool's file carries bytes this codec does not fully model, and the
//! clone-and-overwrite strategy is what keeps those bytes intact. Decoding is
//! the exact inverse.

use crate::container::{
    Container, ROOF_STREAM, SCHEDULE_STREAM, SPACE_STREAM, WALL_STREAM, WINDOW_STREAM,
};
use crate::error::Result;
use crate::layout::{assembly, schedule as schedule_layout, space as space_layout, window};
use crate::model::{Assembly, Project, Schedule, WindowType};
use crate::records::{self, DecodeNames, EncodeMaps, NameIndex, NameList};
use crate::validate::{self, Report};
use std::path::Path;

/// Name the Default Space carries when the template provides no slot 0 to
/// clone it from.
pub const DEFAULT_SPACE_NAME: &str = "DEFAULT";

fn encode_maps(project: &Project) -> Result<EncodeMaps> {
    Ok(EncodeMaps {
        schedules: NameIndex::build(project.schedules.iter().map(|s| s.name.as_str()), "schedule")?,
        walls: NameIndex::build(project.walls.iter().map(|a| a.name.as_str()), "wall")?,
        roofs: NameIndex::build(project.roofs.iter().map(|a| a.name.as_str()), "roof")?,
        windows: NameIndex::build(project.windows.iter().map(|w| w.name.as_str()), "window")?,
    })
}

fn decode_names(project: &Project) -> DecodeNames<'_> {
    DecodeNames {
        schedules: NameList::new(
            project.schedules.iter().map(|s| s.name.as_str()).collect(),
            "schedule",
        ),
        walls: NameList::new(project.walls.iter().map(|a| a.name.as_str()).collect(), "wall"),
        roofs: NameList::new(project.roofs.iter().map(|a| a.name.as_str()).collect(), "roof"),
        windows: NameList::new(
            project.windows.iter().map(|w| w.name.as_str()).collect(),
            "window",
        ),
    }
}

fn encode_schedules(schedules: &[Schedule]) -> Result<Vec<u8>> {
    let mut stream = Vec::with_capacity(schedules.len() * schedule_layout::RECORD_SIZE);
    for schedule in schedules {
        stream.extend_from_slice(&records::schedule::encode(schedule)?);
    }
    Ok(stream)
}

fn encode_assemblies(assemblies: &[Assembly]) -> Result<Vec<u8>> {
    let mut stream = Vec::with_capacity(assemblies.len() * assembly::RECORD_SIZE);
    for item in assemblies {
        stream.extend_from_slice(&records::assembly::encode(item)?);
    }
    Ok(stream)
}

fn encode_windows(windows: &[WindowType]) -> Result<Vec<u8>> {
    let mut stream = Vec::with_capacity(windows.len() * window::RECORD_SIZE);
    for item in windows {
        stream.extend_from_slice(&records::window::encode(item)?);
    }
    Ok(stream)
}

/// Build the sentinel record for Spaces slot 0 from the template's own slot 0,
/// forcing every schedule-reference offset to zero. A template without a
/// usable slot 0 gets a zero-filled record named `DEFAULT`.
fn default_space_record(template_spaces: &[u8]) -> Result<Vec<u8>> {
    let mut record = if template_spaces.len() >= space_layout::RECORD_SIZE {
        template_spaces[..space_layout::RECORD_SIZE].to_vec()
    } else {
        let mut record = vec![0u8; space_layout::RECORD_SIZE];
        crate::binary::write_str(
            &mut record,
            space_layout::NAME,
            space_layout::NAME_LEN,
            DEFAULT_SPACE_NAME,
            "default space",
        )?;
        record
    };
    for &offset in &space_layout::SCHEDULE_REFS {
        crate::binary::write_u16(&mut record, offset, 0);
    }
    Ok(record)
}

fn encode_spaces(project: &Project, maps: &EncodeMaps, template_spaces: &[u8]) -> Result<Vec<u8>> {
    let mut stream =
        Vec::with_capacity((project.spaces.len() + 1) * space_layout::RECORD_SIZE);
    stream.extend_from_slice(&default_space_record(template_spaces)?);
    for space in &project.spaces {
        stream.extend_from_slice(&records::space::encode(space, maps)?);
    }
    Ok(stream)
}

/// Encode a project into a clone of the given template container.
pub fn encode(project: &Project, template: &[u8]) -> Result<Vec<u8>> {
    let mut container = Container::read(template)?;
    let maps = encode_maps(project)?;

    let template_spaces = container.require(SPACE_STREAM)?.to_vec();
    container.replace(SCHEDULE_STREAM, encode_schedules(&project.schedules)?);
    container.replace(WALL_STREAM, encode_assemblies(&project.walls)?);
    container.replace(ROOF_STREAM, encode_assemblies(&project.roofs)?);
    container.replace(WINDOW_STREAM, encode_windows(&project.windows)?);
    container.replace(SPACE_STREAM, encode_spaces(project, &maps, &template_spaces)?);

    container.write()
}

/// Encode a project to disk.
///
/// The template is read from `template_path`; the result goes to `out_path`
/// via a temp-and-rename write, so an encode error never leaves a partial
/// file behind. The freshly written container is validated immediately; a
/// non-clean report is returned to the caller (and logged), but the output
/// file is deliberately kept for inspection.
pub fn encode_to_path(
    project: &Project,
    template_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> Result<Report> {
    let template = std::fs::read(template_path)?;
    let bytes = encode(project, &template)?;

    let container = Container::read(&bytes)?;
    let report = validate::check(&container)?;
    if !report.is_clean() {
        tracing::warn!(
            findings = report.total(),
            "encoded container failed validation, output kept for inspection"
        );
    }

    let out_path = out_path.as_ref();
    let tmp = out_path.with_extension("E3A.tmp");
    if let Err(e) = std::fs::write(&tmp, &bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, out_path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(report)
}

/// Decode a container into a project.
///
/// Stream slot 0 of the Spaces stream is the Default Space sentinel and is
/// never surfaced as a project space.
pub fn decode(bytes: &[u8]) -> Result<Project> {
    let container = Container::read(bytes)?;
    decode_container(&container)
}

/// Decode an already-opened container.
pub fn decode_container(container: &Container) -> Result<Project> {
    let mut project = Project::default();

    for record in records::split(
        container.require(SCHEDULE_STREAM)?,
        schedule_layout::RECORD_SIZE,
        SCHEDULE_STREAM,
    )? {
        project.schedules.push(records::schedule::decode(record)?);
    }
    for record in records::split(
        container.require(WALL_STREAM)?,
        assembly::RECORD_SIZE,
        WALL_STREAM,
    )? {
        project.walls.push(records::assembly::decode(record)?);
    }
    for record in records::split(
        container.require(ROOF_STREAM)?,
        assembly::RECORD_SIZE,
        ROOF_STREAM,
    )? {
        project.roofs.push(records::assembly::decode(record)?);
    }
    for record in records::split(
        container.require(WINDOW_STREAM)?,
        window::RECORD_SIZE,
        WINDOW_STREAM,
    )? {
        project.windows.push(records::window::decode(record)?);
    }

    let names = decode_names(&project);
    let mut spaces = Vec::new();
    for (i, record) in records::split(
        container.require(SPACE_STREAM)?,
        space_layout::RECORD_SIZE,
        SPACE_STREAM,
    )?
    .enumerate()
    {
        if i == 0 {
            continue;
        }
        spaces.push(records::space::decode(record, &names)?);
    }
    project.spaces = spaces;

    Ok(project)
}

/// Open and decode a container from disk.
pub fn decode_path(path: impl AsRef<Path>) -> Result<Project> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
