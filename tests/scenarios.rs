//! End-to-end scenarios against a synthetic known-good template.

use e3a::container::{
    Container, ROOF_STREAM, SCHEDULE_STREAM, SPACE_STREAM, WALL_STREAM, WINDOW_STREAM,
};
use e3a::layout::{self, REF_UNSET};
use e3a::model::*;
use e3a::{binary, codec, records, validate};
use std::path::Path;

/// Build a minimal template container: one schedule, one wall, one roof, one
/// window, a Spaces stream holding only the Default Space sentinel, and one
/// foreign stream the codec does not understand.
fn template() -> Vec<u8> {
    let mut container = Container::default();

    let schedule = Schedule::with_weekday_profile("Tpl_Occ", [0.0; 24]);
    container.replace(
        SCHEDULE_STREAM,
        records::schedule::encode(&schedule).unwrap(),
    );

    let wall = Assembly {
        name: "Tpl_Wall".into(),
        u_value: 0.5,
        ..Default::default()
    };
    container.replace(WALL_STREAM, records::assembly::encode(&wall).unwrap());
    let roof = Assembly {
        name: "Tpl_Roof".into(),
        u_value: 0.3,
        ..Default::default()
    };
    container.replace(ROOF_STREAM, records::assembly::encode(&roof).unwrap());

    let window = WindowType {
        name: "Tpl_Glass".into(),
        u_value: 1.8,
        shgc: 0.7,
        height: 1.5,
        width: 1.0,
        ..Default::default()
    };
    container.replace(WINDOW_STREAM, records::window::encode(&window).unwrap());

    let mut default_space = vec![0u8; layout::space::RECORD_SIZE];
    binary::write_str(&mut default_space, 0, layout::space::NAME_LEN, "DEFAULT", "tpl").unwrap();
    container.replace(SPACE_STREAM, default_space);

    container.replace("FOO.DAT", (0..=255u8).collect());
    container.replace("PROJECT.DAT", b"host tool private bytes".to_vec());

    container.write().unwrap()
}

/// The project of scenario 1: one schedule, one wall type, one space with a
/// single north-facing exterior wall.
fn sample_project() -> Project {
    let mut hours = [0.0; 24];
    hours[8..17].fill(1.0);
    let schedule = Schedule::with_weekday_profile("Sch_Occ", hours);

    let wall_type = Assembly {
        name: "W_EXT".into(),
        u_value: 0.35,
        ..Default::default()
    };

    let space = Space {
        name: "S1".into(),
        floor_area: 20.0,
        ceiling_height: 2.8,
        building_mass: 0.0,
        walls: vec![ExteriorWall {
            orientation: Code::name("N"),
            tilt: Code::name("Vertical"),
            wall_type: Ref::named("W_EXT"),
            gross_area: 10.0,
            window_type: Ref::None,
            window_area: 0.0,
            window_count: 0,
            overhang_projection: 0.0,
            overhang_offset: 0.0,
        }],
        infiltration: Infiltration {
            method: Code::name("ACH"),
            outdoor_air_unit: Code::name("L/s/person"),
            ..Default::default()
        },
        people: PeopleGains {
            occupants: 2.0,
            activity: Code::name("Office work"),
            outdoor_air_unit: Code::name("L/s/person"),
            schedule: Ref::named("Sch_Occ"),
            ..Default::default()
        },
        lighting: LightingGains {
            fixture: Code::name("Recessed unvented"),
            ballast: Code::name("Conventional"),
            ..Default::default()
        },
        ..Default::default()
    };

    Project {
        schedules: vec![schedule],
        walls: vec![wall_type],
        spaces: vec![space],
        ..Default::default()
    }
}

#[test]
fn scenario_clean_project_round_trips() {
    let project = sample_project();
    let bytes = codec::encode(&project, &template()).unwrap();
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn scenario_unresolved_reference_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("template.E3A");
    std::fs::write(&template_path, template()).unwrap();
    let out_path = dir.path().join("out.E3A");

    let mut project = sample_project();
    project.spaces[0].people.schedule = Ref::named("Missing");

    let err = codec::encode_to_path(&project, &template_path, &out_path).unwrap_err();
    match err {
        e3a::Error::UnresolvedReference { field, name } => {
            assert_eq!(field, "people_sch");
            assert_eq!(name, "Missing");
        },
        other => panic!("unexpected error: {}", other),
    }
    assert!(!out_path.exists());
}

fn write_corrupted(dir: &Path, mutate: impl FnOnce(&mut Container)) -> std::path::PathBuf {
    let mut container = Container::read(&template()).unwrap();
    mutate(&mut container);
    let path = dir.join("corrupt.E3A");
    std::fs::write(&path, container.write().unwrap()).unwrap();
    path
}

#[test]
fn scenario_calendar_corruption_repaired_with_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corrupted(dir.path(), |container| {
        let mut stream = container.get(SCHEDULE_STREAM).unwrap().to_vec();
        binary::write_u16(&mut stream, 576, 9);
        container.replace(SCHEDULE_STREAM, stream);
    });

    let report = validate::validate_file(&path, false).unwrap();
    assert_eq!(report.calendar.len(), 1);
    assert!(!report.is_clean());

    let report = validate::validate_file(&path, true).unwrap();
    assert!(report.is_repairable());
    assert!(report.repaired);

    let repaired = Container::open(&path).unwrap();
    assert_eq!(
        binary::read_u16(repaired.get(SCHEDULE_STREAM).unwrap(), 576).unwrap(),
        1
    );

    let backup = validate::backup_path(&path);
    assert!(backup.exists());
    let original = Container::open(&backup).unwrap();
    assert_eq!(
        binary::read_u16(original.get(SCHEDULE_STREAM).unwrap(), 576).unwrap(),
        9
    );

    // Second --fix run: nothing left to find, nothing rewritten.
    let before = std::fs::read(&path).unwrap();
    let second = validate::validate_file(&path, true).unwrap();
    assert!(second.is_clean());
    assert!(!second.repaired);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn scenario_contaminated_default_space_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corrupted(dir.path(), |container| {
        let mut stream = container.get(SPACE_STREAM).unwrap().to_vec();
        binary::write_u16(&mut stream, 594, 3);
        container.replace(SPACE_STREAM, stream);
    });

    let report = validate::validate_file(&path, true).unwrap();
    assert_eq!(report.default_space.len(), 1);
    assert!(report.is_repairable());

    let clean = validate::validate_file(&path, false).unwrap();
    assert!(clean.is_clean());
}

#[test]
fn scenario_dangling_reference_is_report_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corrupted(dir.path(), |container| {
        // 10 schedules, and a space 1 whose people schedule points at 99.
        let schedule_record =
            records::schedule::encode(&Schedule::with_weekday_profile("S", [0.0; 24])).unwrap();
        container.replace(SCHEDULE_STREAM, schedule_record.repeat(10));

        let mut stream = container.get(SPACE_STREAM).unwrap().to_vec();
        stream.extend_from_slice(&vec![0u8; layout::space::RECORD_SIZE]);
        binary::write_u16(&mut stream, layout::space::RECORD_SIZE + 594, 99);
        container.replace(SPACE_STREAM, stream);
    });

    let before = std::fs::read(&path).unwrap();
    let report = validate::validate_file(&path, true).unwrap();
    assert_eq!(report.dangling.len(), 1);
    assert!(!report.is_repairable());
    assert!(!report.repaired);
    // No safe auto-repair: file untouched, no backup written.
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(!validate::backup_path(&path).exists());
}

#[test]
fn scenario_user_space_named_default_round_trips() {
    // Slot position, not name, marks the sentinel: a file whose slot-1 space
    // happens to be called DEFAULT must decode and re-encode byte-exactly.
    let mut container = Container::read(&template()).unwrap();
    let mut stream = container.get(SPACE_STREAM).unwrap().to_vec();
    let mut record = vec![0u8; layout::space::RECORD_SIZE];
    binary::write_str(&mut record, 0, layout::space::NAME_LEN, "DEFAULT", "s1").unwrap();
    binary::write_f32(&mut record, layout::space::FLOOR_AREA, 12.5);
    stream.extend_from_slice(&record);
    container.replace(SPACE_STREAM, stream);
    let file = container.write().unwrap();

    let project = codec::decode(&file).unwrap();
    assert_eq!(project.spaces.len(), 1);
    assert_eq!(project.spaces[0].name, "DEFAULT");

    let bytes = codec::encode(&project, &file).unwrap();
    let input = Container::read(&file).unwrap();
    let output = Container::read(&bytes).unwrap();
    for entry in input.entries() {
        assert_eq!(output.get(&entry.name), Some(entry.data.as_slice()));
    }
}

#[test]
fn scenario_unknown_streams_preserved() {
    let template = template();
    let project = codec::decode(&template).unwrap();
    let bytes = codec::encode(&project, &template).unwrap();

    let output = Container::read(&bytes).unwrap();
    let foreign: Vec<u8> = (0..=255u8).collect();
    assert_eq!(output.get("FOO.DAT"), Some(foreign.as_slice()));
    assert_eq!(
        output.get("PROJECT.DAT"),
        Some(b"host tool private bytes".as_slice())
    );
}

#[test]
fn property_byte_exact_round_trip() {
    // Decode then re-encode with no project mutation: every stream of the
    // output must be byte-identical to the template's.
    let template = template();
    let project = codec::decode(&template).unwrap();
    let bytes = codec::encode(&project, &template).unwrap();

    let input = Container::read(&template).unwrap();
    let output = Container::read(&bytes).unwrap();
    for entry in input.entries() {
        assert_eq!(
            output.get(&entry.name),
            Some(entry.data.as_slice()),
            "stream {} not byte-identical",
            entry.name
        );
    }
    assert_eq!(input.entries().count(), output.entries().count());
}

#[test]
fn property_encoded_streams_are_record_multiples() {
    let bytes = codec::encode(&sample_project(), &template()).unwrap();
    let output = Container::read(&bytes).unwrap();
    let sizes = [
        (SCHEDULE_STREAM, layout::schedule::RECORD_SIZE),
        (SPACE_STREAM, layout::space::RECORD_SIZE),
        (WALL_STREAM, layout::assembly::RECORD_SIZE),
        (ROOF_STREAM, layout::assembly::RECORD_SIZE),
        (WINDOW_STREAM, layout::window::RECORD_SIZE),
    ];
    for (name, size) in sizes {
        let stream = output.get(name).unwrap();
        assert_eq!(stream.len() % size, 0, "{}", name);
    }
}

#[test]
fn property_encoded_indices_are_well_formed() {
    let project = sample_project();
    let bytes = codec::encode(&project, &template()).unwrap();
    let output = Container::read(&bytes).unwrap();
    let spaces = output.get(SPACE_STREAM).unwrap();
    let schedule_count = output.get(SCHEDULE_STREAM).unwrap().len() / layout::schedule::RECORD_SIZE;

    for record in spaces.chunks_exact(layout::space::RECORD_SIZE) {
        for &offset in &layout::space::SCHEDULE_REFS {
            let value = binary::read_u16(record, offset).unwrap();
            assert!(
                value == REF_UNSET || (value as usize) < schedule_count,
                "index {} at offset {}",
                value,
                offset
            );
        }
    }
}

#[test]
fn property_default_space_sentinel_and_calendar_legality() {
    let bytes = codec::encode(&sample_project(), &template()).unwrap();
    let output = Container::read(&bytes).unwrap();

    let spaces = output.get(SPACE_STREAM).unwrap();
    for &offset in &layout::space::SCHEDULE_REFS {
        assert_eq!(binary::read_u16(&spaces[..layout::space::RECORD_SIZE], offset).unwrap(), 0);
    }

    let schedules = output.get(SCHEDULE_STREAM).unwrap();
    for record in schedules.chunks_exact(layout::schedule::RECORD_SIZE) {
        for offset in (layout::schedule::CALENDAR_START..layout::schedule::CALENDAR_END).step_by(2)
        {
            assert!(binary::read_u16(record, offset).unwrap() <= 8);
        }
    }
}

#[test]
fn property_duplicate_names_rejected_on_encode() {
    let mut project = sample_project();
    project
        .schedules
        .push(Schedule::with_weekday_profile("Sch_Occ", [0.0; 24]));
    let err = codec::encode(&project, &template()).unwrap_err();
    assert!(matches!(err, e3a::Error::UnresolvedReference { .. }));
}
