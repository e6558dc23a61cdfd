//! Codec and integrity validator for `.E3A` project archives.
//!
//! An `.E3A` file is a Deflate ZIP archive of fixed-name byte streams, the
//! project format of an HVAC load-calculation tool. This crate owns the
//! binary format: the container, the fixed-width record layouts for spaces,
//! wall and roof assemblies, glazing types and schedules, and the
//! cross-record integrity rules the host tool enforces.
//!
//! # Encoding and decoding
//!
//! Encoding clones a known-good template file and overwrites only the five
//! streams the codec models; everything else in the archive is preserved
//! byte-exactly. Decoding is the exact inverse, and round-tripping an
//! unmodified project reproduces every stream bit for bit.
//!
//! ```no_run
//! use e3a::{Project, codec};
//!
//! let project: Project = codec::decode_path("building.E3A")?;
//! let template = std::fs::read("template.E3A")?;
//! let bytes = codec::encode(&project, &template)?;
//! # Ok::<(), e3a::Error>(())
//! ```
//!
//! # Validation
//!
//! [`validate`] checks the three defect classes seen in practice (calendar
//! corruption, Default Space contamination, dangling schedule references)
//! and can repair the first two in place, leaving a `.backup` sibling.

pub mod binary;
pub mod codec;
pub mod container;
pub mod error;
pub mod interop;
pub mod layout;
pub mod model;
pub mod records;
pub mod tables;
pub mod validate;

pub use container::Container;
pub use error::{Error, Result};
pub use model::{
    Assembly, Code, EquipmentGains, ExteriorWall, FloorSegment, Infiltration, InfiltrationEntry,
    Layer, LightingGains, MiscGains, Partition, PeopleGains, Project, Ref, RoofSegment, Schedule,
    Space, WindowType,
};
pub use validate::{Finding, Report};
