//! Enumerations and parameter groups shared by several tools.

use crate::core::descriptor::Segment;
use crate::core::params::{EnumOption, ParameterSpec};

pub const POINT_FILES: &[&str] = &["las", "laz"];
pub const LAS_FILES: &[&str] = &["las"];
pub const DTM_FILES: &[&str] = &["dtm"];
pub const CSV_FILES: &[&str] = &["csv"];
pub const ASCII_GRID_FILES: &[&str] = &["asc", "txt"];
pub const XYZ_FILES: &[&str] = &["xyz", "txt", "csv"];
pub const SHAPE_FILES: &[&str] = &["shp"];
pub const IMAGE_FILES: &[&str] = &["bmp", "jpg"];
/// Base names; the tool appends its own suffixes.
pub const ANY_FILE: &[&str] = &[];

/// Units for DTM-producing surface tools, written in upper case.
pub const SURFACE_UNITS: &[EnumOption] = &[EnumOption::new("Meter", "M"), EnumOption::new("Feet", "F")];

/// Units for conversion and cover tools, written in lower case.
pub const UNITS: &[EnumOption] = &[EnumOption::new("Meter", "m"), EnumOption::new("Feet", "f")];

pub const COORDINATE_SYSTEMS: &[EnumOption] = &[
    EnumOption::new("Unknown", "0"),
    EnumOption::new("UTM", "1"),
    EnumOption::new("State plane", "2"),
];

pub const HORIZONTAL_DATUMS: &[EnumOption] = &[
    EnumOption::new("Unknown", "0"),
    EnumOption::new("NAD27", "1"),
    EnumOption::new("NAD83", "2"),
];

pub const VERTICAL_DATUMS: &[EnumOption] = &[
    EnumOption::new("Unknown", "0"),
    EnumOption::new("NGVD29", "1"),
    EnumOption::new("NAVD88", "2"),
    EnumOption::new("GRS80", "3"),
];

pub const MODIFIERS: &str = "modifiers";

/// Free-form switches appended as written.
pub fn modifiers() -> ParameterSpec {
    ParameterSpec::string(MODIFIERS, "Additional modifiers").advanced()
}

/// Point cloud input, one file or several through a list file.
pub fn point_inputs() -> ParameterSpec {
    ParameterSpec::inputs("input", "Input LAS layer", POINT_FILES)
}

pub fn ground_model() -> ParameterSpec {
    ParameterSpec::input("ground", "Input ground DTM layer", DTM_FILES)
}

pub fn cellsize(default: f64) -> ParameterSpec {
    ParameterSpec::double("cellsize", "Cell size").default_value(default)
}

/// Projection parameters in FUSION's fixed order.
pub fn projection(units: &'static [EnumOption]) -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::choice("xyunits", "XY units", units).default_choice(0),
        ParameterSpec::choice("zunits", "Z units", units).default_choice(0),
        ParameterSpec::choice("coordsys", "Coordinate system", COORDINATE_SYSTEMS).default_choice(0),
        ParameterSpec::integer("zone", "Coordinate system zone")
            .default_value(0)
            .min(0.0)
            .max(60.0),
        ParameterSpec::choice("hdatum", "Horizontal datum", HORIZONTAL_DATUMS).default_choice(0),
        ParameterSpec::choice("vdatum", "Vertical datum", VERTICAL_DATUMS).default_choice(0),
    ]
}

pub const PROJECTION_SEGMENTS: [Segment; 6] = [
    Segment::value("xyunits"),
    Segment::value("zunits"),
    Segment::value("coordsys"),
    Segment::value("zone"),
    Segment::value("hdatum"),
    Segment::value("vdatum"),
];

/// Surface tools only know units; the four zeros stand for an unknown
/// coordinate system, zone and datums.
pub fn surface_units() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::choice("xyunits", "XY units", SURFACE_UNITS).default_choice(0),
        ParameterSpec::choice("zunits", "Z units", SURFACE_UNITS).default_choice(0),
    ]
}

pub const SURFACE_UNIT_SEGMENTS: [Segment; 6] = [
    Segment::value("xyunits"),
    Segment::value("zunits"),
    Segment::literal("0"),
    Segment::literal("0"),
    Segment::literal("0"),
    Segment::literal("0"),
];
