use super::options::*;
use crate::core::descriptor::{Segment, ToolDescriptor, ToolGroup};
use crate::core::params::ParameterSpec;
use crate::core::registry::ToolRegistryBuilder;

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder
        .register(ascii2dtm())
        .register(csv2grid())
        .register(dtm2ascii())
        .register(dtm2envi())
        .register(dtm2tif())
        .register(dtm2xyz())
        .register(xyz2dtm());
}

fn ascii2dtm() -> ToolDescriptor {
    ToolDescriptor::builder("ascii2dtm", "ASCII to DTM", ToolGroup::Conversion)
        .summary("Converts an ASCII raster surface model into the PLANS DTM format.")
        .executable("ASCII2DTM.exe")
        .param(ParameterSpec::input("input", "Input ESRI ASCII layer", ASCII_GRID_FILES))
        .params(projection(UNITS))
        .param(ParameterSpec::output("output", "Output", DTM_FILES))
        .param(ParameterSpec::double("multiplier", "Multiply all data values by this constant").advanced())
        .param(ParameterSpec::double("offset", "Add this constant to all data values").advanced())
        .param(ParameterSpec::boolean("nan", "Check for NAN values in the ASCII grid"))
        .template([
            Segment::option("multiplier"),
            Segment::option("offset"),
            Segment::switch("nan"),
            Segment::path("output"),
        ])
        .template(PROJECTION_SEGMENTS)
        .template([Segment::path("input")])
        .build()
}

fn csv2grid() -> ToolDescriptor {
    ToolDescriptor::builder("csv2grid", "CSV to grid", ToolGroup::Conversion)
        .summary("Converts one column of a CSV file produced by GridMetrics into an ASCII raster.")
        .executable("CSV2Grid.exe")
        .param(ParameterSpec::input("input", "CSV file", CSV_FILES))
        .param(ParameterSpec::integer("column", "Column").min(1.0))
        .param(ParameterSpec::output("output", "Output", ASCII_GRID_FILES))
        .param(ParameterSpec::double("multiplier", "Multiply all data values by this constant").advanced())
        .param(
            ParameterSpec::integer("ndzero", "Treat values of zero as no-data in this column")
                .min(1.0)
                .advanced(),
        )
        .template([
            Segment::option("multiplier"),
            Segment::option("ndzero"),
            Segment::path("input"),
            Segment::value("column"),
            Segment::path("output"),
        ])
        .build()
}

fn dtm2ascii() -> ToolDescriptor {
    ToolDescriptor::builder("dtm2ascii", "DTM to ASCII", ToolGroup::Conversion)
        .summary("Converts a PLANS DTM into an ASCII raster or CSV file.")
        .executable("DTM2ASCII.exe")
        .param(ParameterSpec::input("input", "Input DTM layer", DTM_FILES))
        .param(ParameterSpec::output("output", "Output", &["asc", "csv"]))
        .param(ParameterSpec::boolean("csv", "Output in CSV format"))
        .param(ParameterSpec::boolean("raster", "Interpret values as raster data"))
        .param(ParameterSpec::double("multiplier", "Multiply all data values by this constant").advanced())
        .template([
            Segment::switch("csv"),
            Segment::switch("raster"),
            Segment::option("multiplier"),
            Segment::path("input"),
            Segment::path("output"),
        ])
        .exclusive("csv", "raster")
        .build()
}

fn dtm2envi() -> ToolDescriptor {
    ToolDescriptor::builder("dtm2envi", "DTM to ENVI", ToolGroup::Conversion)
        .summary("Converts a PLANS DTM into an ENVI standard format raster.")
        .executable("DTM2ENVI.exe")
        .param(ParameterSpec::input("input", "Input DTM layer", DTM_FILES))
        .param(ParameterSpec::output("output", "Output", &["img", "dat"]))
        .param(ParameterSpec::boolean("south", "Data is in the southern hemisphere"))
        .template([
            Segment::switch("south"),
            Segment::path("input"),
            Segment::path("output"),
        ])
        .build()
}

fn dtm2tif() -> ToolDescriptor {
    ToolDescriptor::builder("dtm2tif", "DTM to TIF", ToolGroup::Conversion)
        .summary("Converts a PLANS DTM into a GeoTIFF image.")
        .executable("DTM2TIF.exe")
        .param(ParameterSpec::input("input", "Input DTM layer", DTM_FILES))
        .param(ParameterSpec::output("output", "Output", &["tif", "tiff"]))
        .param(ParameterSpec::boolean("mask", "Produce a mask image of valid data"))
        .template([
            Segment::switch("mask"),
            Segment::path("input"),
            Segment::path("output"),
        ])
        .build()
}

fn dtm2xyz() -> ToolDescriptor {
    ToolDescriptor::builder("dtm2xyz", "DTM to XYZ", ToolGroup::Conversion)
        .summary("Converts a PLANS DTM into ASCII XYZ points.")
        .executable("DTM2XYZ.exe")
        .param(ParameterSpec::input("input", "Input DTM layer", DTM_FILES))
        .param(ParameterSpec::output("output", "Output", XYZ_FILES))
        .param(ParameterSpec::boolean("csv", "Output in CSV format"))
        .param(ParameterSpec::boolean("void", "Output points from DTM with NODATA value"))
        .param(ParameterSpec::boolean("noheader", "Do not include column headings in CSV output"))
        .template([
            Segment::switch("csv"),
            Segment::switch("void"),
            Segment::switch_if("noheader", "csv"),
            Segment::path("input"),
            Segment::path("output"),
        ])
        .build()
}

fn xyz2dtm() -> ToolDescriptor {
    ToolDescriptor::builder("xyz2dtm", "XYZ to DTM", ToolGroup::Conversion)
        .summary("Converts surface models stored as ASCII XYZ points into the PLANS DTM format.")
        .executable("XYZ2DTM.exe")
        .param(ParameterSpec::inputs("input", "Input XYZ layer", XYZ_FILES))
        .params(projection(UNITS))
        .param(ParameterSpec::output("output", "Output", DTM_FILES))
        .param(
            ParameterSpec::integer("fillholes", "Fill holes up to this size (cells)")
                .min(0.0)
                .advanced(),
        )
        .template([Segment::option("fillholes"), Segment::path("output")])
        .template(PROJECTION_SEGMENTS)
        .template([Segment::input_list("input")])
        .build()
}
